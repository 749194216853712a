use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A signed-in user, as returned by an `Authenticator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub signed_in_at: DateTime<Utc>,
}
