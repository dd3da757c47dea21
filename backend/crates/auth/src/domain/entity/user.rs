//! User Entity
//!
//! Public profile of an account. The password hash lives in [`Credential`].
//!
//! [`Credential`]: super::credential::Credential

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::user_name::UserName;

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, used for sign-in
    pub user_name: UserName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_name: UserName) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_user_name(&mut self, user_name: UserName) {
        self.user_name = user_name;
        self.updated_at = Utc::now();
    }
}
