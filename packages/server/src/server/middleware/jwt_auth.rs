use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::common::{Actor, Role};
use crate::domains::auth::JwtService;
use crate::server::error::ApiError;

/// Authenticated caller, taken from a verified identity token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// Authorization subject for domain activities
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

/// JWT authentication middleware
///
/// Verifies the bearer token and adds [`AuthUser`] to request extensions.
/// Requests without a valid token continue unauthenticated; handlers that
/// need a caller reject them through the `AuthUser` extractor.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(&request, &jwt_service) {
        debug!(user_id = %user.user_id, role = %user.role, "Authenticated request");
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_str = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();

    match jwt_service.verify_token(token) {
        Ok(claims) => Some(AuthUser {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        }),
        Err(e) => {
            debug!(error = %e, "Rejected identity token");
            None
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}
