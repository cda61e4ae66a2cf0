use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header carrying the caller's member uuid, set by the upstream gateway.
pub const AUTH_ID: &str = "AUTH-ID";
/// Header carrying the caller's roles as a JSON array, e.g. `["ROLE_USER"]`.
pub const WWW_AUTHENTICATION: &str = "WWW-Authentication";

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Caller identity as asserted by the upstream gateway.
///
/// The gateway has already authenticated the request, so the headers are trusted
/// as-is. Add this as a handler parameter to require an identity; pass it on to
/// services that need to know who is acting.
#[derive(Debug, Clone)]
pub struct AuthMember {
    pub uuid: String,
    pub roles: Vec<String>,
}

impl AuthMember {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Returns `Ok(())` if the caller has the given role, `Err(PermissionDenied)` otherwise.
    pub fn require_role(&self, role: &str) -> Result<(), AppError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

impl<S> FromRequestParts<S> for AuthMember
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let uuid = parts
            .headers
            .get(AUTH_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AppError::AuthMissing)?
            .to_string();

        let roles = match parts.headers.get(WWW_AUTHENTICATION) {
            Some(value) => {
                let raw = value
                    .to_str()
                    .map_err(|_| AppError::Validation("Malformed role header".into()))?;
                parse_roles(raw)?
            }
            None => Vec::new(),
        };

        Ok(AuthMember { uuid, roles })
    }
}

fn parse_roles(raw: &str) -> Result<Vec<String>, AppError> {
    serde_json::from_str::<Vec<String>>(raw)
        .map_err(|_| AppError::Validation("Role header must be a JSON array of strings".into()))
}

/// Same as [`AuthMember`] but additionally requires `ROLE_ADMIN`.
pub struct AdminMember(pub AuthMember);

impl<S> FromRequestParts<S> for AdminMember
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let member = AuthMember::from_request_parts(parts, state).await?;
        member.require_role(ROLE_ADMIN)?;
        Ok(AdminMember(member))
    }
}
