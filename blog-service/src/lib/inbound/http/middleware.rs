use std::sync::Arc;

use auth::Authenticator;
use auth::GateOutcome;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::handlers::ApiResponseBody;
use crate::domain::user::models::UserId;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that admits a request only if it carries a valid session token.
///
/// The token is read from the `Authorization` header, with or without the
/// `Bearer` scheme. On success an [`AuthenticatedUser`] is added to the
/// request extensions; otherwise the request ends with `401 Unauthorized`
/// and the wrapped handler never runs. The rejection reason is only logged.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let identity = match authenticator.authorize(header_value) {
        GateOutcome::Authenticated(identity) => identity,
        GateOutcome::Rejected(rejection) => {
            tracing::warn!(reason = %rejection, uri = %req.uri(), "Request rejected");
            return Err(unauthorized());
        }
    };

    let user_id = UserId::from_string(&identity.id).map_err(|e| {
        tracing::warn!(error = %e, "Token identity is not a user ID");
        unauthorized()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponseBody::new_error(
            StatusCode::UNAUTHORIZED,
            "Unauthorized".to_string(),
        )),
    )
        .into_response()
}
