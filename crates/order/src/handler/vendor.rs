use crate::{
    abstract_trait::vendor_order::service::{
        DynVendorOrderCommandService, DynVendorOrderQueryService,
    },
    domain::{
        actor::Actor,
        requests::vendor_order::{BulkItemStatusRequest, UpdateItemStatusRequest},
        response::{
            api::ApiResponse,
            vendor_order::{VendorDashboardResponse, VendorOrderResponse},
        },
    },
    middleware::{jwt::auth_middleware, role::require_vendor, validate::ValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/vendor/orders",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sub-orders of the vendor, newest first", body = ApiResponse<Vec<VendorOrderResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Vendor role required")
    )
)]
pub async fn get_vendor_orders(
    Extension(service): Extension<DynVendorOrderQueryService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_my_vendor_orders(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/vendor/orders/{order_id}/item/{item_id}",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    params(
        ("order_id" = i32, Path, description = "Vendor sub-order ID"),
        ("item_id" = i32, Path, description = "Sub-order item ID")
    ),
    request_body = UpdateItemStatusRequest,
    responses(
        (status = 200, description = "Item status set", body = ApiResponse<VendorOrderResponse>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Vendor role required"),
        (status = 404, description = "Sub-order or item not found")
    )
)]
pub async fn update_item_status(
    Extension(service): Extension<DynVendorOrderCommandService>,
    Extension(actor): Extension<Actor>,
    Path((order_id, item_id)): Path<(i32, i32)>,
    ValidatedJson(body): ValidatedJson<UpdateItemStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .update_item_status(&actor, order_id, item_id, &body)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/vendor/orders/{order_id}/items",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    params(("order_id" = i32, Path, description = "Vendor sub-order ID")),
    request_body = BulkItemStatusRequest,
    responses(
        (status = 200, description = "Valid entries applied", body = ApiResponse<VendorOrderResponse>),
        (status = 400, description = "No valid entries"),
        (status = 403, description = "Vendor role required"),
        (status = 404, description = "Sub-order not found")
    )
)]
pub async fn update_item_statuses(
    Extension(service): Extension<DynVendorOrderCommandService>,
    Extension(actor): Extension<Actor>,
    Path(order_id): Path<i32>,
    ValidatedJson(body): ValidatedJson<BulkItemStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .update_item_statuses(&actor, order_id, &body)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/vendor/dashboard",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vendor stats", body = ApiResponse<VendorDashboardResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Vendor role required")
    )
)]
pub async fn get_dashboard(
    Extension(service): Extension<DynVendorOrderQueryService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.dashboard(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn vendor_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/vendor/orders", get(get_vendor_orders))
        .route(
            "/api/vendor/orders/{order_id}/item/{item_id}",
            put(update_item_status),
        )
        .route("/api/vendor/orders/{order_id}/items", put(update_item_statuses))
        .route("/api/vendor/dashboard", get(get_dashboard))
        .route_layer(middleware::from_fn(require_vendor))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.vendor_order_command.clone()))
        .layer(Extension(app_state.di_container.vendor_order_query.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
