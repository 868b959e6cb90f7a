use crate::models::{MatchRow, UserRow};
use crate::Database;
use anyhow::Result;
use rusqlite::{Connection, Row};

const MATCH_COLUMNS: &str = "id, owner_id, date, player_deck, opponent_deck, win, reason, \
     used_sideboard, played_first, starting_hand_size, lands_in_opener, opponent_name, notes";

impl Database {
    // -- Users --

    /// Returns the id SQLite assigned to the new user, or None when the
    /// username is already taken.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<Option<i64>> {
        self.with_conn(|conn| {
            match conn.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                (username, password_hash),
            ) {
                Ok(_) => Ok(Some(conn.last_insert_rowid())),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Matches --

    pub fn insert_match(&self, row: &MatchRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO matches ({MATCH_COLUMNS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
                ),
                rusqlite::params![
                    row.id,
                    row.owner_id,
                    row.date,
                    row.player_deck,
                    row.opponent_deck,
                    row.win,
                    row.reason,
                    row.used_sideboard,
                    row.played_first,
                    row.starting_hand_size,
                    row.lands_in_opener,
                    row.opponent_name,
                    row.notes,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_match(&self, id: &str) -> Result<Option<MatchRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = ?1"))?;
            let row = stmt.query_row([id], map_match_row).optional()?;
            Ok(row)
        })
    }

    /// Returns false when no row had that id.
    pub fn delete_match(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM matches WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }

    /// Newest first. `before` is an encoded date cursor, `limit` of None
    /// returns every row.
    pub fn get_matches_by_owner(
        &self,
        owner_id: i64,
        limit: Option<u32>,
        before: Option<&str>,
    ) -> Result<Vec<MatchRow>> {
        self.with_conn(|conn| query_matches_by_owner(conn, owner_id, limit, before))
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_matches_by_owner(
    conn: &Connection,
    owner_id: i64,
    limit: Option<u32>,
    before: Option<&str>,
) -> Result<Vec<MatchRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MATCH_COLUMNS}
         FROM matches
         WHERE owner_id = ?1 AND (?2 IS NULL OR date < ?2)
         ORDER BY date DESC, id
         LIMIT ?3"
    ))?;

    // SQLite treats a negative LIMIT as unbounded
    let limit = limit.map(i64::from).unwrap_or(-1);

    let rows = stmt
        .query_map(rusqlite::params![owner_id, before, limit], map_match_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_match_row(row: &Row<'_>) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        date: row.get(2)?,
        player_deck: row.get(3)?,
        opponent_deck: row.get(4)?,
        win: row.get(5)?,
        reason: row.get(6)?,
        used_sideboard: row.get(7)?,
        played_first: row.get(8)?,
        starting_hand_size: row.get(9)?,
        lands_in_opener: row.get(10)?,
        opponent_name: row.get(11)?,
        notes: row.get(12)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_username_is_reported_as_taken() {
        let db = Database::open_in_memory().unwrap();
        let first = db.create_user("levi", "hash").unwrap();
        assert!(first.is_some());
        assert_eq!(db.create_user("levi", "other-hash").unwrap(), None);
        assert_eq!(db.get_user_by_username("levi").unwrap().unwrap().id, first.unwrap());
    }
}
