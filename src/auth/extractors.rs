use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::Role;

/// The identity resolved for the current request.
///
/// A small immutable value built once per request from the verified token
/// claims, then passed explicitly to downstream authorization checks. There
/// is no implicit current-user state anywhere else.
///
/// This extractor is intended to be used on routes protected by `AuthMiddleware`,
/// which is responsible for validating the JWT and inserting the `Claims` into
/// request extensions. If the claims are not found (e.g., if `AuthMiddleware`
/// did not run), this extractor returns `AppError::Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub user_id: i32,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Gate for admin-only operations. A valid identity without the admin
    /// role is a 403, distinct from the 401 of a missing or bad token.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin role required".to_string()))
        }
    }
}

impl From<&Claims> for AuthenticatedUser {
    fn from(claims: &Claims) -> Self {
        Self {
            username: claims.sub.clone(),
            user_id: claims.id,
            role: claims.role,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError; // AppError will be converted into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUser::from(claims))),
            None => {
                // This case should not be reached if AuthMiddleware is correctly
                // applied. Responding with Unauthorized is a safe default.
                let err = AppError::Unauthorized(
                    "Identity not resolved. Ensure AuthMiddleware is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
