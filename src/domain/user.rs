//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user entity
    pub fn new(
        id: Uuid,
        username: String,
        email: String,
        full_name: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            full_name,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewUser {
    /// Unique login name
    #[schema(example = "jdoe")]
    pub username: String,
    /// User email address
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    /// Display name
    #[schema(example = "John Doe")]
    pub full_name: String,
    /// Plain-text password, hashed before storage
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

/// Full replacement of the mutable profile fields
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProfileUpdate {
    /// New login name
    #[schema(example = "jdoe")]
    pub username: String,
    /// New email address
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    /// New display name
    #[schema(example = "Jane Doe")]
    pub full_name: String,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Login name
    #[schema(example = "jdoe")]
    pub username: String,
    /// Email address
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    /// Display name
    #[schema(example = "John Doe")]
    pub full_name: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            created_at: user.created_at,
        }
    }
}
