use crate::{
    abstract_trait::{
        listing::DynListingQueryRepository,
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::OrderCommandServiceTrait,
        },
        vendor_order::repository::DynVendorOrderQueryRepository,
    },
    domain::{
        actor::{Actor, Role},
        capability::authorize_order_status_change,
        fan_out::{OrderLine, plan_fan_out},
        requests::order::{CreateOrderRecordRequest, CreateOrderRequest, UpdateOrderStatusRequest},
        response::{
            api::ApiResponse,
            order::{CreateOrderResponse, OrderResponse},
            vendor_order::VendorOrderResponse,
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
use tracing::{info, warn};

const TRACER: &str = "order-command-service";

#[derive(Clone)]
pub struct OrderCommandService {
    listing_query: DynListingQueryRepository,
    command: DynOrderCommandRepository,
    query: DynOrderQueryRepository,
    vendor_order_query: DynVendorOrderQueryRepository,
    strict_fan_out: bool,
    metrics: Metrics,
}

pub struct OrderCommandServiceDeps {
    pub listing_query: DynListingQueryRepository,
    pub command: DynOrderCommandRepository,
    pub query: DynOrderQueryRepository,
    pub vendor_order_query: DynVendorOrderQueryRepository,
    /// Reject checkouts with unknown listings instead of dropping them.
    pub strict_fan_out: bool,
}

impl OrderCommandService {
    pub fn new(deps: OrderCommandServiceDeps, registry: &mut Registry) -> Self {
        let OrderCommandServiceDeps {
            listing_query,
            command,
            query,
            vendor_order_query,
            strict_fan_out,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(registry, "order_command_service", "OrderCommandService");

        Self {
            listing_query,
            command,
            query,
            vendor_order_query,
            strict_fan_out,
            metrics,
        }
    }

    async fn place_order(
        &self,
        actor: &Actor,
        req: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, ServiceError> {
        actor.require(Role::Customer)?;

        if req.items.is_empty() {
            return Err(ServiceError::BadRequest(
                "Order must contain at least one item".into(),
            ));
        }

        let lines: Vec<OrderLine> = req.items.iter().map(OrderLine::from).collect();

        let mut listing_ids: Vec<i32> = lines.iter().map(|line| line.listing_id).collect();
        listing_ids.sort_unstable();
        listing_ids.dedup();

        let listings = self.listing_query.find_by_ids(&listing_ids).await?;
        let plan = plan_fan_out(&lines, &listings)?;

        if !plan.is_complete() {
            if self.strict_fan_out {
                return Err(ServiceError::BadRequest(format!(
                    "Unknown listings: {:?}",
                    plan.unresolved
                )));
            }
            warn!(
                "⚠️ Dropping unresolved listings {:?} from fan-out for user {}",
                plan.unresolved, actor.user_id
            );
        }

        let record = CreateOrderRecordRequest {
            user_id: actor.user_id,
            items: lines,
            delivery: req.delivery.clone(),
            total: req.total,
            vendor_orders: plan.groups,
        };

        let (order, vendor_orders) = self.command.create_order(&record).await?;

        Ok(CreateOrderResponse {
            order: OrderResponse::with_item_statuses(order, &vendor_orders),
            vendor_orders: vendor_orders
                .into_iter()
                .map(VendorOrderResponse::from)
                .collect(),
        })
    }

    async fn change_status(
        &self,
        actor: &Actor,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<OrderResponse, ServiceError> {
        let target = req.parsed()?;

        let order = self
            .query
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".into()))?;

        authorize_order_status_change(actor, order.user_id, order.status, target)?;

        let updated = match actor.role {
            Role::Admin => self.command.update_status(order_id, target).await?,
            _ => self
                .command
                .transition_status(order_id, order.status, target)
                .await?
                .ok_or_else(|| {
                    ServiceError::BadRequest("Order status changed, cancellation refused".into())
                })?,
        };
        let vendor_orders = self.vendor_order_query.find_by_order(order_id).await?;

        Ok(OrderResponse::with_item_statuses(updated, &vendor_orders))
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        actor: &Actor,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<CreateOrderResponse>, ServiceError> {
        info!("🏗️ Creating new order for user_id={}", actor.user_id);

        let tracing_ctx = TracingContext::start(
            TRACER,
            "create_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "create"),
                KeyValue::new("order.user_id", actor.user_id.to_string()),
                KeyValue::new("order.items", req.items.len() as i64),
            ],
        );

        match self.place_order(actor, req).await {
            Ok(created) => {
                tracing_ctx.success(
                    &self.metrics,
                    Method::Post,
                    &format!(
                        "Order {} created with {} sub-order(s)",
                        created.order.id,
                        created.vendor_orders.len()
                    ),
                );
                Ok(ApiResponse::success("Order created successfully", created))
            }
            Err(e) => {
                tracing_ctx.failure(&self.metrics, Method::Post, &e.to_string());
                Err(e)
            }
        }
    }

    async fn update_order_status(
        &self,
        actor: &Actor,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!(
            "🔄 User {} ({}) setting order {} to {}",
            actor.user_id, actor.role, order_id, req.status
        );

        let tracing_ctx = TracingContext::start(
            TRACER,
            "update_order_status",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "update_status"),
                KeyValue::new("order.id", order_id.to_string()),
                KeyValue::new("order.status", req.status.clone()),
            ],
        );

        match self.change_status(actor, order_id, req).await {
            Ok(order) => {
                tracing_ctx.success(
                    &self.metrics,
                    Method::Put,
                    &format!("Order {} is now {}", order.id, order.status.as_str()),
                );
                Ok(ApiResponse::success("Order status updated successfully", order))
            }
            Err(e) => {
                tracing_ctx.failure(&self.metrics, Method::Put, &e.to_string());
                Err(e)
            }
        }
    }
}
