// ABOUTME: Authentication context for API requests
// ABOUTME: Trusts the identity headers supplied by the upstream auth layer

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use letterhead_core::{Actor, Role};

/// Current authenticated actor, read from `x-actor-id` / `x-actor-role`.
///
/// Credential verification happens upstream (reverse proxy / session layer);
/// this service trusts the identity it is handed, per the deployment
/// contract. Requests without an identity are rejected outright.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or((StatusCode::UNAUTHORIZED, "Missing actor identity"))?;

        let role = match parts
            .headers
            .get("x-actor-role")
            .and_then(|v| v.to_str().ok())
        {
            Some("admin") => Role::Admin,
            Some("staff") | None => Role::Staff,
            Some(_) => return Err((StatusCode::UNAUTHORIZED, "Unknown actor role")),
        };

        Ok(CurrentActor(Actor {
            id: id.to_string(),
            role,
        }))
    }
}
