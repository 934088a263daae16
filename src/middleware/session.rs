use axum::extract::FromRequestParts;
use uuid::Uuid;

use crate::error::AppError;

pub const SESSION_HEADER: &str = "x-session-id";

/// Anonymous shopper identity. The storefront client generates a UUID once
/// and sends it on every request; the matching session is created lazily on
/// first touch.
#[derive(Debug, Clone, Copy)]
pub struct ShopperSession {
    pub session_id: Uuid,
}

impl<S> FromRequestParts<S> for ShopperSession
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(SESSION_HEADER)
            .ok_or_else(|| AppError::BadRequest(format!("Missing {SESSION_HEADER} header")))?;

        let raw = header
            .to_str()
            .map_err(|_| AppError::BadRequest(format!("Invalid {SESSION_HEADER} header")))?;

        let session_id = Uuid::parse_str(raw)
            .map_err(|_| AppError::BadRequest(format!("{SESSION_HEADER} must be a UUID")))?;

        Ok(ShopperSession { session_id })
    }
}
