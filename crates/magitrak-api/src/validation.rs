use chrono::Datelike;
use thiserror::Error;

use magitrak_types::NewMatch;
use magitrak_types::models::zero_date;

/// Names every required field that was missing or unset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing or invalid field(s): {}", .fields.join(", "))]
pub struct ValidationError {
    pub fields: Vec<&'static str>,
}

/// Years an RFC 3339 timestamp can carry.
const DATE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Checks a create payload is complete enough to persist.
pub fn validate(new: &NewMatch) -> Result<(), ValidationError> {
    let mut fields = Vec::new();

    if new
        .date
        .is_none_or(|d| d == zero_date() || !DATE_YEARS.contains(&d.year()))
    {
        fields.push("date");
    }
    if new.player_deck.is_empty() {
        fields.push("playerDeck");
    }
    if new.opponent_deck.is_empty() {
        fields.push("opponentDeck");
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn valid() -> NewMatch {
        NewMatch {
            owner_id: 1,
            date: Some(Utc::now()),
            player_deck: "burn".into(),
            opponent_deck: "bloom".into(),
            ..Default::default()
        }
    }

    #[test]
    fn complete_match_passes() {
        assert_eq!(validate(&valid()), Ok(()));
    }

    #[test]
    fn missing_date_fails() {
        let mut m = valid();
        m.date = None;
        assert_eq!(validate(&m).unwrap_err().fields, ["date"]);
    }

    #[test]
    fn zero_date_counts_as_unset() {
        let mut m = valid();
        m.date = Some(zero_date());
        assert_eq!(validate(&m).unwrap_err().fields, ["date"]);
    }

    #[test]
    fn dates_outside_four_digit_years_fail() {
        for raw in ["+10000-01-01T00:00:00Z", "-0001-01-01T00:00:00Z"] {
            let mut m = valid();
            m.date = Some(raw.parse().unwrap());
            assert_eq!(validate(&m).unwrap_err().fields, ["date"], "{raw}");
        }

        let mut m = valid();
        m.date = Some("9999-12-31T23:59:59Z".parse().unwrap());
        assert_eq!(validate(&m), Ok(()));
    }

    #[test]
    fn empty_decks_fail() {
        let mut m = valid();
        m.player_deck.clear();
        assert_eq!(validate(&m).unwrap_err().fields, ["playerDeck"]);

        let mut m = valid();
        m.opponent_deck.clear();
        assert_eq!(validate(&m).unwrap_err().fields, ["opponentDeck"]);
    }

    #[test]
    fn every_failing_field_is_named() {
        let err = validate(&NewMatch::default()).unwrap_err();
        assert_eq!(err.fields, ["date", "playerDeck", "opponentDeck"]);
        assert_eq!(
            err.to_string(),
            "missing or invalid field(s): date, playerDeck, opponentDeck"
        );
    }
}
