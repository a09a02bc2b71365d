use serde::{Deserialize, Serialize};

/// User record held by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,                      // sequential, starts at 1
    pub username: String,             // unique, case-sensitive
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,        // argon2 PHC string, not exposed in JSON
    pub is_active: bool,
}
