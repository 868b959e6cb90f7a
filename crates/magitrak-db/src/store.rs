use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use tracing::debug;
use uuid::Uuid;

use magitrak_types::{MatchRecord, NewMatch};

use crate::Database;
use crate::models::MatchRow;

/// Upper bound on a single list page.
pub const MAX_PAGE_SIZE: u32 = 500;

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub limit: Option<u32>,
    pub before: Option<DateTime<Utc>>,
}

/// Persistence for match records. Calls block until the backend answers, so
/// async callers should run them on a blocking thread.
pub trait MatchStore: Send + Sync {
    /// Persist a new match and return the id assigned to it.
    fn create(&self, new: &NewMatch) -> Result<String>;

    /// `Ok(None)` means no match has that id.
    fn fetch_by_id(&self, id: &str) -> Result<Option<MatchRecord>>;

    /// `Ok(false)` means nothing was removed.
    fn delete_by_id(&self, id: &str) -> Result<bool>;

    fn list_by_owner(&self, owner_id: i64, filter: &ListFilter) -> Result<Vec<MatchRecord>>;
}

impl MatchStore for Database {
    fn create(&self, new: &NewMatch) -> Result<String> {
        let date = new.date.ok_or_else(|| anyhow!("match has no date"))?;
        if !(0..=9999).contains(&date.year()) {
            bail!("match date {} cannot be stored", date);
        }
        let id = Uuid::new_v4().to_string();

        self.insert_match(&MatchRow {
            id: id.clone(),
            owner_id: new.owner_id,
            date: encode_date(&date),
            player_deck: new.player_deck.clone(),
            opponent_deck: new.opponent_deck.clone(),
            win: new.win,
            reason: new.reason.clone(),
            used_sideboard: new.used_sideboard,
            played_first: new.played_first,
            starting_hand_size: new.starting_hand_size,
            lands_in_opener: new.lands_in_opener,
            opponent_name: new.opponent_name.clone(),
            notes: new.notes.clone(),
        })?;

        debug!(match_id = %id, owner_id = new.owner_id, "Match stored");
        Ok(id)
    }

    fn fetch_by_id(&self, id: &str) -> Result<Option<MatchRecord>> {
        self.get_match(id)?.map(into_record).transpose()
    }

    fn delete_by_id(&self, id: &str) -> Result<bool> {
        let removed = self.delete_match(id)?;
        debug!(match_id = %id, removed, "Match delete");
        Ok(removed)
    }

    fn list_by_owner(&self, owner_id: i64, filter: &ListFilter) -> Result<Vec<MatchRecord>> {
        let limit = filter.limit.map(|l| l.min(MAX_PAGE_SIZE));
        let before = filter.before.as_ref().map(encode_date);

        self.get_matches_by_owner(owner_id, limit, before.as_deref())?
            .into_iter()
            .map(into_record)
            .collect()
    }
}

/// Fixed nine-digit fraction keeps lexical order equal to time order.
fn encode_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn into_record(row: MatchRow) -> Result<MatchRecord> {
    let date = DateTime::parse_from_rfc3339(&row.date)
        .with_context(|| format!("corrupt date '{}' on match '{}'", row.date, row.id))?
        .with_timezone(&Utc);

    Ok(MatchRecord {
        id: row.id,
        owner_id: row.owner_id,
        date,
        player_deck: row.player_deck,
        opponent_deck: row.opponent_deck,
        win: row.win,
        reason: row.reason,
        used_sideboard: row.used_sideboard,
        played_first: row.played_first,
        starting_hand_size: row.starting_hand_size,
        lands_in_opener: row.lands_in_opener,
        opponent_name: row.opponent_name,
        notes: row.notes,
    })
}
