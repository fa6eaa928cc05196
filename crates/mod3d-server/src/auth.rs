use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use mod3d_types::UserId;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(UserId),
}

impl Identity {
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(id),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    /// Read credentials from an `Authorization` header value.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.and_then(|v| v.strip_prefix("Bearer ")) {
            Some(token) if !token.trim().is_empty() => Self::Bearer(token.trim().to_string()),
            _ => Self::Anonymous,
        }
    }
}

/// Resolves request credentials to an identity.
///
/// Session handling lives outside the catalog; a provider only turns what the
/// upstream session layer attached to the request into an identity.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity>;
}

/// Treats the bearer token as the user id, as issued by an upstream session layer.
pub struct BearerUserAuth;

#[async_trait]
impl AuthProvider for BearerUserAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) => UserId::new(token.clone())
                .map(Identity::User)
                .map_err(|e| ServerError::AuthFailed(e.to_string())),
            Credentials::Anonymous => Ok(Identity::Anonymous),
        }
    }
}

/// Extractor for handlers that require a signed-in user.
#[derive(Clone, Debug)]
pub struct Authenticated(pub UserId);

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> ServerResult<Self> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let credentials = Credentials::from_header(header);
        match state.auth.authenticate(&credentials).await? {
            Identity::User(id) => Ok(Self(id)),
            Identity::Anonymous => Err(ServerError::Unauthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_from_header() {
        assert!(matches!(
            Credentials::from_header(Some("Bearer u1")),
            Credentials::Bearer(t) if t == "u1"
        ));
        assert!(matches!(Credentials::from_header(Some("Bearer   ")), Credentials::Anonymous));
        assert!(matches!(Credentials::from_header(Some("Basic abc")), Credentials::Anonymous));
        assert!(matches!(Credentials::from_header(None), Credentials::Anonymous));
    }

    #[tokio::test]
    async fn bearer_token_becomes_user() {
        let auth = BearerUserAuth;
        let id = auth
            .authenticate(&Credentials::Bearer("u1".into()))
            .await
            .unwrap();
        assert_eq!(id.user_id().map(UserId::as_str), Some("u1"));
    }

    #[tokio::test]
    async fn anonymous_stays_anonymous() {
        let auth = BearerUserAuth;
        let id = auth.authenticate(&Credentials::Anonymous).await.unwrap();
        assert_eq!(id, Identity::Anonymous);
        assert!(id.user_id().is_none());
    }
}
