use crate::{
    abstract_trait::{
        listing::DynListingQueryRepository,
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::{DynOrderCommandService, DynOrderQueryService},
        },
        vendor_order::{
            repository::{DynVendorOrderCommandRepository, DynVendorOrderQueryRepository},
            service::{DynVendorOrderCommandService, DynVendorOrderQueryService},
        },
    },
    repository::{
        listing::ListingQueryRepository,
        order::{OrderCommandRepository, OrderQueryRepository},
        vendor_order::{VendorOrderCommandRepository, VendorOrderQueryRepository},
    },
    service::{
        aggregator::OrderStatusAggregator,
        order::{OrderCommandService, OrderCommandServiceDeps, OrderQueryService},
        vendor_order::{
            VendorOrderCommandService, VendorOrderCommandServiceDeps, VendorOrderQueryService,
        },
    },
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

/// Repository handles the services are wired from. Tests swap in
/// in-memory implementations.
#[derive(Clone)]
pub struct Repositories {
    pub listing_query: DynListingQueryRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub vendor_order_query: DynVendorOrderQueryRepository,
    pub vendor_order_command: DynVendorOrderCommandRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            listing_query: Arc::new(ListingQueryRepository::new(pool.clone())),
            order_query: Arc::new(OrderQueryRepository::new(pool.clone())),
            order_command: Arc::new(OrderCommandRepository::new(pool.clone())),
            vendor_order_query: Arc::new(VendorOrderQueryRepository::new(pool.clone())),
            vendor_order_command: Arc::new(VendorOrderCommandRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_command: DynOrderCommandService,
    pub order_query: DynOrderQueryService,
    pub vendor_order_command: DynVendorOrderCommandService,
    pub vendor_order_query: DynVendorOrderQueryService,
    pub aggregator: OrderStatusAggregator,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_command", &"OrderCommandService")
            .field("order_query", &"OrderQueryService")
            .field("vendor_order_command", &"VendorOrderCommandService")
            .field("vendor_order_query", &"VendorOrderQueryService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(repos: Repositories, strict_fan_out: bool, registry: &mut Registry) -> Self {
        let Repositories {
            listing_query,
            order_query,
            order_command,
            vendor_order_query,
            vendor_order_command,
        } = repos;

        let aggregator =
            OrderStatusAggregator::new(vendor_order_query.clone(), order_command.clone());

        let order_command_service = OrderCommandService::new(
            OrderCommandServiceDeps {
                listing_query: listing_query.clone(),
                command: order_command,
                query: order_query.clone(),
                vendor_order_query: vendor_order_query.clone(),
                strict_fan_out,
            },
            registry,
        );

        let order_query_service =
            OrderQueryService::new(order_query, vendor_order_query.clone(), registry);

        let vendor_order_command_service = VendorOrderCommandService::new(
            VendorOrderCommandServiceDeps {
                query: vendor_order_query.clone(),
                command: vendor_order_command,
                aggregator: aggregator.clone(),
            },
            registry,
        );

        let vendor_order_query_service =
            VendorOrderQueryService::new(vendor_order_query, listing_query, registry);

        Self {
            order_command: Arc::new(order_command_service),
            order_query: Arc::new(order_query_service),
            vendor_order_command: Arc::new(vendor_order_command_service),
            vendor_order_query: Arc::new(vendor_order_query_service),
            aggregator,
        }
    }
}
