use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user_out::UserOut;

/// Account record reserved for todo ownership. Nothing stores or
/// authenticates users yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn to_out_dto(&self) -> UserOut {
        UserOut {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            is_active: self.is_active,
            is_admin: self.is_admin,
        }
    }
}
