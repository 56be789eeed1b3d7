use crate::{
    abstract_trait::{
        listing::DynListingQueryRepository,
        vendor_order::{
            repository::DynVendorOrderQueryRepository, service::VendorOrderQueryServiceTrait,
        },
    },
    domain::{
        actor::{Actor, Role},
        response::{
            api::ApiResponse,
            vendor_order::{VendorDashboardResponse, VendorOrderResponse},
        },
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;

const TRACER: &str = "vendor-order-query-service";

#[derive(Clone)]
pub struct VendorOrderQueryService {
    query: DynVendorOrderQueryRepository,
    listing_query: DynListingQueryRepository,
    metrics: Metrics,
}

impl VendorOrderQueryService {
    pub fn new(
        query: DynVendorOrderQueryRepository,
        listing_query: DynListingQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(
            registry,
            "vendor_order_query_service",
            "VendorOrderQueryService",
        );

        Self {
            query,
            listing_query,
            metrics,
        }
    }

    async fn load_vendor_orders(
        &self,
        actor: &Actor,
    ) -> Result<Vec<VendorOrderResponse>, ServiceError> {
        actor.require(Role::Vendor)?;

        let vendor_orders = self.query.find_by_vendor(actor.user_id).await?;
        Ok(vendor_orders.into_iter().map(Into::into).collect())
    }

    async fn load_dashboard(&self, actor: &Actor) -> Result<VendorDashboardResponse, ServiceError> {
        actor.require(Role::Vendor)?;

        let (total_products, active_products) =
            self.listing_query.count_by_vendor(actor.user_id).await?;
        let pending_orders = self.query.count_pending_by_vendor(actor.user_id).await?;

        Ok(VendorDashboardResponse {
            total_products,
            active_products,
            pending_orders,
        })
    }
}

#[async_trait]
impl VendorOrderQueryServiceTrait for VendorOrderQueryService {
    async fn find_my_vendor_orders(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<VendorOrderResponse>>, ServiceError> {
        info!("📦 Finding sub-orders of vendor {}", actor.user_id);

        let tracing_ctx = TracingContext::start(
            TRACER,
            "find_vendor_orders",
            vec![
                KeyValue::new("component", "vendor_order"),
                KeyValue::new("vendor.id", actor.user_id.to_string()),
            ],
        );

        match self.load_vendor_orders(actor).await {
            Ok(orders) => {
                tracing_ctx.success(
                    &self.metrics,
                    Method::Get,
                    &format!("Found {} sub-orders", orders.len()),
                );
                Ok(ApiResponse::success(
                    "Vendor orders retrieved successfully",
                    orders,
                ))
            }
            Err(e) => {
                tracing_ctx.failure(&self.metrics, Method::Get, &e.to_string());
                Err(e)
            }
        }
    }

    async fn dashboard(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<VendorDashboardResponse>, ServiceError> {
        info!("📊 Building dashboard for vendor {}", actor.user_id);

        let tracing_ctx = TracingContext::start(
            TRACER,
            "vendor_dashboard",
            vec![
                KeyValue::new("component", "vendor_order"),
                KeyValue::new("vendor.id", actor.user_id.to_string()),
            ],
        );

        match self.load_dashboard(actor).await {
            Ok(stats) => {
                tracing_ctx.success(&self.metrics, Method::Get, "Dashboard built");
                Ok(ApiResponse::success(
                    "Dashboard retrieved successfully",
                    stats,
                ))
            }
            Err(e) => {
                tracing_ctx.failure(&self.metrics, Method::Get, &e.to_string());
                Err(e)
            }
        }
    }
}
