//! Marketplace users, keyed by the identity provider's uid.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp, UserId};

/// A registered user. Ads, reservations and feedback refer to users by `uid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub uid: UserId,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role_id: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields a client supplies when registering or editing a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub uid: UserId,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub firstname: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub lastname: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(range(min = 1, message = "must be a positive role id"))]
    pub role_id: i16,
}

impl UserInput {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(CoreError::from)
    }

    /// An update addressed to `/users/{uid}` may not rename the user.
    pub fn check_uid(&self, uid: &str) -> Result<(), CoreError> {
        if self.uid != uid {
            return Err(CoreError::Validation(format!(
                "uid: body uid '{}' does not match path uid '{uid}'",
                self.uid
            )));
        }
        Ok(())
    }
}
