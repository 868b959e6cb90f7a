use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("session user {session_owner} may not act on a match owned by user {record_owner}")]
pub struct Denied {
    pub session_owner: i64,
    pub record_owner: i64,
}

/// Only the owning identity may create, read or delete a match.
pub fn authorize(session_owner: i64, record_owner: i64) -> Result<(), Denied> {
    if session_owner == record_owner {
        Ok(())
    } else {
        Err(Denied {
            session_owner,
            record_owner,
        })
    }
}
