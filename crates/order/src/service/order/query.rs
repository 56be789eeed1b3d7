use crate::{
    abstract_trait::{
        order::{repository::DynOrderQueryRepository, service::OrderQueryServiceTrait},
        vendor_order::repository::DynVendorOrderQueryRepository,
    },
    domain::{
        actor::Actor,
        capability::can_view_order,
        response::{api::ApiResponse, order::OrderResponse},
    },
    model::order::Order,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;

const TRACER: &str = "order-query-service";

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    vendor_order_query: DynVendorOrderQueryRepository,
    metrics: Metrics,
}

impl OrderQueryService {
    pub fn new(
        query: DynOrderQueryRepository,
        vendor_order_query: DynVendorOrderQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "order_query_service", "OrderQueryService");

        Self {
            query,
            vendor_order_query,
            metrics,
        }
    }

    async fn to_response(&self, order: Order) -> Result<OrderResponse, ServiceError> {
        let vendor_orders = self.vendor_order_query.find_by_order(order.order_id).await?;
        Ok(OrderResponse::with_item_statuses(order, &vendor_orders))
    }

    async fn load_orders(&self, actor: &Actor) -> Result<Vec<OrderResponse>, ServiceError> {
        let orders = self.query.find_by_user(actor.user_id).await?;

        let mut responses = Vec::with_capacity(orders.len());
        for order in orders {
            responses.push(self.to_response(order).await?);
        }
        Ok(responses)
    }

    async fn load_order(&self, actor: &Actor, order_id: i32) -> Result<OrderResponse, ServiceError> {
        let order = self
            .query
            .find_by_id(order_id)
            .await?
            .filter(|order| can_view_order(actor, order.user_id))
            .ok_or_else(|| ServiceError::NotFound("Order not found".into()))?;

        self.to_response(order).await
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_my_orders(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        info!("📦 Finding orders of user {}", actor.user_id);

        let tracing_ctx = TracingContext::start(
            TRACER,
            "find_my_orders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.user_id", actor.user_id.to_string()),
            ],
        );

        match self.load_orders(actor).await {
            Ok(orders) => {
                tracing_ctx.success(
                    &self.metrics,
                    Method::Get,
                    &format!("Found {} orders", orders.len()),
                );
                Ok(ApiResponse::success("Orders retrieved successfully", orders))
            }
            Err(e) => {
                tracing_ctx.failure(&self.metrics, Method::Get, &e.to_string());
                Err(e)
            }
        }
    }

    async fn find_by_id(
        &self,
        actor: &Actor,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🆔 Finding order {} for user {}", order_id, actor.user_id);

        let tracing_ctx = TracingContext::start(
            TRACER,
            "find_order_by_id",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", order_id.to_string()),
            ],
        );

        match self.load_order(actor, order_id).await {
            Ok(order) => {
                tracing_ctx.success(&self.metrics, Method::Get, &format!("Found order {order_id}"));
                Ok(ApiResponse::success("Order retrieved successfully", order))
            }
            Err(e) => {
                tracing_ctx.failure(&self.metrics, Method::Get, &e.to_string());
                Err(e)
            }
        }
    }
}
