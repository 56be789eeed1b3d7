use crate::domain::actor::{Actor, Role};
use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{abstract_trait::DynJwtService, config::Claims, errors::ErrorResponse};
use tracing::warn;

type AuthRejection = (StatusCode, Json<ErrorResponse>);

fn unauthorized(message: &str) -> AuthRejection {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            status: "fail".to_string(),
            message: message.to_string(),
        }),
    )
}

fn actor_from_claims(claims: &Claims) -> Option<Actor> {
    let user_id = i32::try_from(claims.user_id).ok()?;
    let role = Role::parse(&claims.role)?;
    Some(Actor::new(user_id, role))
}

/// Verifies the access token from the `token` cookie or the bearer header
/// and stores the resulting [`Actor`] in the request extensions.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, AuthRejection> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
        .ok_or_else(|| unauthorized("You are not logged in, please provide token"))?;

    let claims = jwt.verify_token(&token, "access").map_err(|e| {
        warn!("🔒 Rejected token: {e}");
        unauthorized("Invalid token")
    })?;

    let actor = actor_from_claims(&claims).ok_or_else(|| unauthorized("Invalid token claims"))?;

    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}
