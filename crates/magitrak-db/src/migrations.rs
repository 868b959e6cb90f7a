use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- date is RFC 3339 with a fixed nine-digit fraction so text order is time order
        CREATE TABLE IF NOT EXISTS matches (
            id                  TEXT PRIMARY KEY,
            owner_id            INTEGER NOT NULL,
            date                TEXT NOT NULL,
            player_deck         TEXT NOT NULL,
            opponent_deck       TEXT NOT NULL,
            win                 INTEGER NOT NULL,
            reason              TEXT,
            used_sideboard      INTEGER NOT NULL,
            played_first        INTEGER NOT NULL,
            starting_hand_size  INTEGER NOT NULL,
            lands_in_opener     INTEGER NOT NULL,
            opponent_name       TEXT,
            notes               TEXT,
            created_at          TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_matches_owner
            ON matches(owner_id, date);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
