//! Database row types. These map directly to SQLite rows and are kept apart
//! from the wire types in magitrak-types.

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

pub struct MatchRow {
    pub id: String,
    pub owner_id: i64,
    pub date: String,
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
