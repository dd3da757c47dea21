//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::account::ProfileOutput;

// ============================================================================
// Sign Up / Sign In
// ============================================================================

/// Body of both sign-up and sign-in
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub name: String,
    pub password: String,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
pub struct SignUpResponse {
    pub id: UserId,
}

// ============================================================================
// Users
// ============================================================================

/// GET /users/me response
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileOutput> for ProfileResponse {
    fn from(output: ProfileOutput) -> Self {
        Self {
            id: output.user_id,
            name: output.user_name,
            created_at: output.created_at,
            updated_at: output.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

/// `{}` acknowledgement
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyResponse {}
