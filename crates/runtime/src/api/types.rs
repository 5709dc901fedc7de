//! Request and response bodies shared with front-ends.

use pet_core::PetConfig;
use serde::{Deserialize, Serialize};

use super::errors::{Result, ServiceError};
use crate::repository::UserId;

const REQUIRED_MESSAGE: &str = "Username and password are required.";

/// Username/password pair as submitted by a client. Fields may be absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Both fields present and non-blank.
    fn required(&self) -> Result<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password))
                if !username.trim().is_empty() && !password.trim().is_empty() =>
            {
                Ok((username, password))
            }
            _ => Err(ServiceError::Validation(REQUIRED_MESSAGE.to_string())),
        }
    }

    /// Rules for a new account: required fields plus minimum lengths.
    pub fn validate_registration(&self) -> Result<(&str, &str)> {
        let (username, password) = self.required()?;
        if username.chars().count() < PetConfig::MIN_USERNAME_LEN
            || password.chars().count() < PetConfig::MIN_PASSWORD_LEN
        {
            return Err(ServiceError::Validation(format!(
                "Username must be at least {} characters and password at least {} characters.",
                PetConfig::MIN_USERNAME_LEN,
                PetConfig::MIN_PASSWORD_LEN
            )));
        }
        Ok((username, password))
    }

    /// Rules for a login attempt: both fields must be present.
    pub fn validate_login(&self) -> Result<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok((username, password))
            }
            _ => Err(ServiceError::Validation(REQUIRED_MESSAGE.to_string())),
        }
    }
}

/// Body of `POST /api/pet/action`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ActionRequest {
    pub action: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
