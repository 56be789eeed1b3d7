use crate::domain::actor::{Actor, Role};
use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use shared::errors::ErrorResponse;

type RoleRejection = (StatusCode, Json<ErrorResponse>);

fn check(actor: &Actor, role: Role) -> Result<(), RoleRejection> {
    if actor.role == role {
        return Ok(());
    }

    Err((
        StatusCode::FORBIDDEN,
        Json(ErrorResponse {
            status: "fail".to_string(),
            message: format!("Access denied: {role} role required"),
        }),
    ))
}

/// Must run after `auth_middleware`.
pub async fn require_vendor(
    Extension(actor): Extension<Actor>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, RoleRejection> {
    check(&actor, Role::Vendor)?;
    Ok(next.run(req).await)
}

pub async fn require_customer(
    Extension(actor): Extension<Actor>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, RoleRejection> {
    check(&actor, Role::Customer)?;
    Ok(next.run(req).await)
}
