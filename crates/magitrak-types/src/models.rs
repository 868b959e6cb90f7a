use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One played game as it is stored and served back to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String,
    #[serde(alias = "userid")]
    pub owner_id: i64,
    pub date: DateTime<Utc>,
    pub player_deck: String,
    pub opponent_deck: String,
    pub win: bool,
    pub reason: Option<String>,
    pub used_sideboard: bool,
    pub played_first: bool,
    pub starting_hand_size: i32,
    pub lands_in_opener: i32,
    pub opponent_name: Option<String>,
    pub notes: Option<String>,
}

/// Body of a create request. Every field falls back to its zero value when
/// absent so incomplete payloads surface as validation failures, not parse
/// failures. A client-supplied `id` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMatch {
    #[serde(alias = "userid")]
    pub owner_id: i64,
    pub date: Option<DateTime<Utc>>,
    pub player_deck: String,
    pub opponent_deck: String,
    pub win: bool,
    pub reason: Option<String>,
    pub used_sideboard: bool,
    pub played_first: bool,
    pub starting_hand_size: i32,
    pub lands_in_opener: i32,
    pub opponent_name: Option<String>,
    pub notes: Option<String>,
}

impl NewMatch {
    /// Attach the store-assigned id. Callers must have validated `date`.
    pub fn into_record(self, id: String, date: DateTime<Utc>) -> MatchRecord {
        MatchRecord {
            id,
            owner_id: self.owner_id,
            date,
            player_deck: self.player_deck,
            opponent_deck: self.opponent_deck,
            win: self.win,
            reason: self.reason,
            used_sideboard: self.used_sideboard,
            played_first: self.played_first,
            starting_hand_size: self.starting_hand_size,
            lands_in_opener: self.lands_in_opener,
            opponent_name: self.opponent_name,
            notes: self.notes,
        }
    }
}

/// The zero instant `0001-01-01T00:00:00Z`. Older clients send it to mean
/// "no date".
pub fn zero_date() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
