use crate::{
    abstract_trait::vendor_order::{
        repository::{DynVendorOrderCommandRepository, DynVendorOrderQueryRepository},
        service::VendorOrderCommandServiceTrait,
    },
    domain::{
        actor::{Actor, Role},
        capability::owns_vendor_order,
        requests::vendor_order::{
            BulkItemStatusRequest, ItemStatusUpdate, UpdateItemStatusRecordRequest,
            UpdateItemStatusRequest,
        },
        response::{api::ApiResponse, vendor_order::VendorOrderResponse},
        status::ItemStatus,
    },
    model::vendor_order::VendorOrder,
    service::aggregator::OrderStatusAggregator,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::{info, warn};

const TRACER: &str = "vendor-order-command-service";

#[derive(Clone)]
pub struct VendorOrderCommandService {
    query: DynVendorOrderQueryRepository,
    command: DynVendorOrderCommandRepository,
    aggregator: OrderStatusAggregator,
    metrics: Metrics,
}

pub struct VendorOrderCommandServiceDeps {
    pub query: DynVendorOrderQueryRepository,
    pub command: DynVendorOrderCommandRepository,
    pub aggregator: OrderStatusAggregator,
}

impl VendorOrderCommandService {
    pub fn new(deps: VendorOrderCommandServiceDeps, registry: &mut Registry) -> Self {
        let VendorOrderCommandServiceDeps {
            query,
            command,
            aggregator,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(
            registry,
            "vendor_order_command_service",
            "VendorOrderCommandService",
        );

        Self {
            query,
            command,
            aggregator,
            metrics,
        }
    }

    async fn find_owned(
        &self,
        actor: &Actor,
        vendor_order_id: i32,
    ) -> Result<VendorOrder, ServiceError> {
        actor.require(Role::Vendor)?;

        self.query
            .find_by_id(vendor_order_id)
            .await?
            .filter(|vendor_order| owns_vendor_order(actor, vendor_order.vendor_id))
            .ok_or_else(|| ServiceError::NotFound("Vendor order not found".into()))
    }

    /// Writes the updates, then brings the parent order in line. The vendor
    /// status is derived by the store from the items it holds after the write.
    async fn apply(
        &self,
        vendor_order: &VendorOrder,
        updates: Vec<ItemStatusUpdate>,
    ) -> Result<VendorOrder, ServiceError> {
        let record = UpdateItemStatusRecordRequest {
            vendor_order_id: vendor_order.vendor_order_id,
            updates,
        };

        let updated = self.command.update_item_statuses(&record).await?;
        self.aggregator.recompute(updated.order_id).await?;

        Ok(updated)
    }

    async fn set_item_status(
        &self,
        actor: &Actor,
        vendor_order_id: i32,
        item_id: i32,
        req: &UpdateItemStatusRequest,
    ) -> Result<VendorOrder, ServiceError> {
        let status = req.parsed()?;
        let vendor_order = self.find_owned(actor, vendor_order_id).await?;

        if vendor_order.find_item(item_id).is_none() {
            return Err(ServiceError::NotFound("Item not found".into()));
        }

        self.apply(&vendor_order, vec![ItemStatusUpdate { item_id, status }])
            .await
    }

    async fn set_item_statuses(
        &self,
        actor: &Actor,
        vendor_order_id: i32,
        req: &BulkItemStatusRequest,
    ) -> Result<VendorOrder, ServiceError> {
        if req.items.is_empty() {
            return Err(ServiceError::BadRequest(
                "No items provided for update".into(),
            ));
        }

        let vendor_order = self.find_owned(actor, vendor_order_id).await?;

        let mut updates = Vec::with_capacity(req.items.len());
        for entry in &req.items {
            let Ok(status) = entry.status.parse::<ItemStatus>() else {
                warn!(
                    "⚠️ Skipping item {} of sub-order {}: invalid status '{}'",
                    entry.item_id, vendor_order_id, entry.status
                );
                continue;
            };

            if vendor_order.find_item(entry.item_id).is_none() {
                warn!(
                    "⚠️ Skipping item {}: not part of sub-order {}",
                    entry.item_id, vendor_order_id
                );
                continue;
            }

            updates.push(ItemStatusUpdate {
                item_id: entry.item_id,
                status,
            });
        }

        if updates.is_empty() {
            return Err(ServiceError::BadRequest(
                "No valid items to update".into(),
            ));
        }

        self.apply(&vendor_order, updates).await
    }
}

#[async_trait]
impl VendorOrderCommandServiceTrait for VendorOrderCommandService {
    async fn update_item_status(
        &self,
        actor: &Actor,
        vendor_order_id: i32,
        item_id: i32,
        req: &UpdateItemStatusRequest,
    ) -> Result<ApiResponse<VendorOrderResponse>, ServiceError> {
        info!(
            "📝 Vendor {} setting item {} of sub-order {} to {}",
            actor.user_id, item_id, vendor_order_id, req.status
        );

        let tracing_ctx = TracingContext::start(
            TRACER,
            "update_item_status",
            vec![
                KeyValue::new("component", "vendor_order"),
                KeyValue::new("vendor_order.id", vendor_order_id.to_string()),
                KeyValue::new("vendor_order.item_id", item_id.to_string()),
                KeyValue::new("vendor_order.item_status", req.status.clone()),
            ],
        );

        match self
            .set_item_status(actor, vendor_order_id, item_id, req)
            .await
        {
            Ok(vendor_order) => {
                tracing_ctx.success(
                    &self.metrics,
                    Method::Put,
                    &format!(
                        "Sub-order {} is now {}",
                        vendor_order.vendor_order_id, vendor_order.vendor_status
                    ),
                );
                Ok(ApiResponse::success(
                    "Item status updated successfully",
                    vendor_order.into(),
                ))
            }
            Err(e) => {
                tracing_ctx.failure(&self.metrics, Method::Put, &e.to_string());
                Err(e)
            }
        }
    }

    async fn update_item_statuses(
        &self,
        actor: &Actor,
        vendor_order_id: i32,
        req: &BulkItemStatusRequest,
    ) -> Result<ApiResponse<VendorOrderResponse>, ServiceError> {
        info!(
            "📝 Vendor {} bulk-updating {} item(s) of sub-order {}",
            actor.user_id,
            req.items.len(),
            vendor_order_id
        );

        let tracing_ctx = TracingContext::start(
            TRACER,
            "update_item_statuses",
            vec![
                KeyValue::new("component", "vendor_order"),
                KeyValue::new("vendor_order.id", vendor_order_id.to_string()),
                KeyValue::new("vendor_order.entries", req.items.len() as i64),
            ],
        );

        match self.set_item_statuses(actor, vendor_order_id, req).await {
            Ok(vendor_order) => {
                tracing_ctx.success(
                    &self.metrics,
                    Method::Put,
                    &format!(
                        "Sub-order {} is now {}",
                        vendor_order.vendor_order_id, vendor_order.vendor_status
                    ),
                );
                Ok(ApiResponse::success(
                    "Item statuses updated successfully",
                    vendor_order.into(),
                ))
            }
            Err(e) => {
                tracing_ctx.failure(&self.metrics, Method::Put, &e.to_string());
                Err(e)
            }
        }
    }
}
