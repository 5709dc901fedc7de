//! Bearer token extractor.
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use runtime::{PetService, UserId};

use super::error::ApiError;

/// The authenticated caller. Handlers taking this never run for a request
/// without a valid token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

#[async_trait]
impl FromRequestParts<PetService> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        service: &PetService,
    ) -> Result<Self, Self::Rejection> {
        // A header that is not valid UTF-8 is treated as malformed, not missing.
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().unwrap_or(""));
        Ok(AuthUser(service.authenticate(header)?))
    }
}
