#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use order::{
    abstract_trait::{
        listing::ListingQueryRepositoryTrait,
        order::{
            repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
            service::OrderCommandServiceTrait,
        },
        vendor_order::repository::{
            VendorOrderCommandRepositoryTrait, VendorOrderQueryRepositoryTrait,
        },
    },
    di::{DependenciesInject, Repositories},
    domain::{
        actor::{Actor, Role},
        aggregate::derive_vendor_status,
        delivery::{Delivery, DeliveryMethod},
        requests::{
            order::{CreateOrderItemRequest, CreateOrderRecordRequest, CreateOrderRequest},
            vendor_order::UpdateItemStatusRecordRequest,
        },
        response::order::CreateOrderResponse,
        status::{ItemStatus, OrderStatus, VendorOrderStatus},
    },
    model::{
        listing::Listing,
        order::{Order, OrderItem},
        vendor_order::{VendorOrder, VendorOrderItem},
    },
};
use prometheus_client::registry::Registry;
use shared::errors::RepositoryError;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    listings: Vec<Listing>,
    orders: Vec<Order>,
    vendor_orders: Vec<VendorOrder>,
    last_id: i32,
    clock: i64,
    item_writes: usize,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn tick(&mut self) -> Option<NaiveDateTime> {
        self.clock += 1;
        DateTime::from_timestamp(1_750_000_000 + self.clock, 0).map(|dt| dt.naive_utc())
    }
}

/// Backs every repository trait with one in-process store.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn with_listings(listings: Vec<Listing>) -> Arc<Self> {
        let store = Self::default();
        store.state.lock().unwrap().listings = listings;
        Arc::new(store)
    }

    pub fn stored_order(&self, order_id: i32) -> Option<Order> {
        let state = self.state.lock().unwrap();
        state.orders.iter().find(|o| o.order_id == order_id).cloned()
    }

    pub fn stored_vendor_order(&self, vendor_order_id: i32) -> Option<VendorOrder> {
        let state = self.state.lock().unwrap();
        state
            .vendor_orders
            .iter()
            .find(|v| v.vendor_order_id == vendor_order_id)
            .cloned()
    }

    pub fn stored_vendor_orders_of(&self, order_id: i32) -> Vec<VendorOrder> {
        let state = self.state.lock().unwrap();
        state
            .vendor_orders
            .iter()
            .filter(|v| v.order_id == order_id)
            .cloned()
            .collect()
    }

    pub fn order_count(&self) -> usize {
        self.state.lock().unwrap().orders.len()
    }

    pub fn vendor_order_count(&self) -> usize {
        self.state.lock().unwrap().vendor_orders.len()
    }

    pub fn item_writes(&self) -> usize {
        self.state.lock().unwrap().item_writes
    }
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            listing_query: self.clone(),
            order_query: self.clone(),
            order_command: self.clone(),
            vendor_order_query: self.clone(),
            vendor_order_command: self.clone(),
        }
    }
}

#[async_trait]
impl ListingQueryRepositoryTrait for InMemoryStore {
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Listing>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .listings
            .iter()
            .filter(|l| ids.contains(&l.listing_id))
            .cloned()
            .collect())
    }

    async fn count_by_vendor(&self, vendor_id: i32) -> Result<(i64, i64), RepositoryError> {
        let state = self.state.lock().unwrap();
        let owned: Vec<&Listing> = state
            .listings
            .iter()
            .filter(|l| l.vendor_id == vendor_id)
            .collect();
        let active = owned.iter().filter(|l| l.is_active).count();
        Ok((owned.len() as i64, active as i64))
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryStore {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<(Order, Vec<VendorOrder>), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let order_id = state.next_id();

        let items = req
            .items
            .iter()
            .map(|line| OrderItem {
                order_item_id: state.next_id(),
                listing_id: line.listing_id,
                title: line.title.clone(),
                price: line.price,
                quantity: line.quantity,
            })
            .collect();

        let mut vendor_orders = Vec::new();
        for group in &req.vendor_orders {
            let vendor_order_id = state.next_id();
            let items = group
                .lines
                .iter()
                .map(|line| VendorOrderItem {
                    vendor_order_item_id: state.next_id(),
                    listing_id: line.listing_id,
                    title: line.title.clone(),
                    price: line.price,
                    quantity: line.quantity,
                    status: ItemStatus::Pending,
                })
                .collect();

            vendor_orders.push(VendorOrder {
                vendor_order_id,
                order_id,
                vendor_id: group.vendor_id,
                buyer_id: req.user_id,
                items,
                subtotal: group.subtotal,
                vendor_status: VendorOrderStatus::Pending,
                delivery: req.delivery.clone(),
                created_at: now,
                updated_at: now,
            });
        }

        let order = Order {
            order_id,
            user_id: req.user_id,
            items,
            delivery: req.delivery.clone(),
            total: req.total,
            status: OrderStatus::Pending,
            vendor_order_ids: vendor_orders.iter().map(|v| v.vendor_order_id).collect(),
            created_at: now,
            updated_at: now,
        };

        state.orders.push(order.clone());
        state.vendor_orders.extend(vendor_orders.iter().cloned());

        Ok((order, vendor_orders))
    }

    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or(RepositoryError::NotFound)?;

        order.status = status;
        order.updated_at = now;
        Ok(order.clone())
    }

    async fn transition_status(
        &self,
        order_id: i32,
        expected: OrderStatus,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or(RepositoryError::NotFound)?;

        if order.status != expected {
            return Ok(None);
        }

        order.status = status;
        order.updated_at = now;
        Ok(Some(order.clone()))
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryStore {
    async fn find_by_id(&self, order_id: i32) -> Result<Option<Order>, RepositoryError> {
        Ok(self.stored_order(order_id))
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut orders: Vec<Order> = state
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| (b.created_at, b.order_id).cmp(&(a.created_at, a.order_id)));
        Ok(orders)
    }
}

#[async_trait]
impl VendorOrderQueryRepositoryTrait for InMemoryStore {
    async fn find_by_id(
        &self,
        vendor_order_id: i32,
    ) -> Result<Option<VendorOrder>, RepositoryError> {
        Ok(self.stored_vendor_order(vendor_order_id))
    }

    async fn find_by_order(&self, order_id: i32) -> Result<Vec<VendorOrder>, RepositoryError> {
        let mut found = self.stored_vendor_orders_of(order_id);
        found.sort_by_key(|v| v.vendor_order_id);
        Ok(found)
    }

    async fn find_by_vendor(&self, vendor_id: i32) -> Result<Vec<VendorOrder>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut found: Vec<VendorOrder> = state
            .vendor_orders
            .iter()
            .filter(|v| v.vendor_id == vendor_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            (b.created_at, b.vendor_order_id).cmp(&(a.created_at, a.vendor_order_id))
        });
        Ok(found)
    }

    async fn count_pending_by_vendor(&self, vendor_id: i32) -> Result<i64, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .vendor_orders
            .iter()
            .filter(|v| v.vendor_id == vendor_id && v.vendor_status == VendorOrderStatus::Pending)
            .count() as i64)
    }
}

#[async_trait]
impl VendorOrderCommandRepositoryTrait for InMemoryStore {
    async fn update_item_statuses(
        &self,
        req: &UpdateItemStatusRecordRequest,
    ) -> Result<VendorOrder, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        state.item_writes += 1;

        let vendor_order = state
            .vendor_orders
            .iter_mut()
            .find(|v| v.vendor_order_id == req.vendor_order_id)
            .ok_or(RepositoryError::NotFound)?;

        let all_known = req
            .updates
            .iter()
            .all(|u| vendor_order.find_item(u.item_id).is_some());
        if !all_known {
            return Err(RepositoryError::NotFound);
        }

        for update in &req.updates {
            if let Some(item) = vendor_order
                .items
                .iter_mut()
                .find(|i| i.vendor_order_item_id == update.item_id)
            {
                item.status = update.status;
            }
        }
        vendor_order.vendor_status = derive_vendor_status(&vendor_order.item_statuses());
        vendor_order.updated_at = now;

        Ok(vendor_order.clone())
    }
}

pub const CUSTOMER_ID: i32 = 7;
pub const OTHER_CUSTOMER_ID: i32 = 8;
pub const VENDOR_A: i32 = 10;
pub const VENDOR_B: i32 = 20;

pub fn customer() -> Actor {
    Actor::new(CUSTOMER_ID, Role::Customer)
}

pub fn other_customer() -> Actor {
    Actor::new(OTHER_CUSTOMER_ID, Role::Customer)
}

pub fn vendor(vendor_id: i32) -> Actor {
    Actor::new(vendor_id, Role::Vendor)
}

pub fn admin() -> Actor {
    Actor::new(1, Role::Admin)
}

pub fn listing(listing_id: i32, vendor_id: i32, price: i64) -> Listing {
    Listing {
        listing_id,
        vendor_id,
        title: format!("Listing {listing_id}"),
        price,
        stock: 25,
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

/// Listings 1..=3 belong to vendor A, 4..=5 to vendor B.
pub fn catalogue() -> Vec<Listing> {
    vec![
        listing(1, VENDOR_A, 1_500),
        listing(2, VENDOR_A, 2_000),
        listing(3, VENDOR_A, 700),
        listing(4, VENDOR_B, 3_200),
        listing(5, VENDOR_B, 900),
    ]
}

pub fn item(listing_id: i32, price: i64, quantity: i32) -> CreateOrderItemRequest {
    CreateOrderItemRequest {
        listing_id,
        title: format!("Listing {listing_id}"),
        price,
        quantity,
    }
}

pub fn order_request(items: Vec<CreateOrderItemRequest>) -> CreateOrderRequest {
    let total = items
        .iter()
        .map(|i| i.price.saturating_mul(i64::from(i.quantity)))
        .fold(0, i64::saturating_add);
    CreateOrderRequest {
        items,
        delivery: Delivery {
            first_name: Some("Amaka".into()),
            last_name: Some("Eze".into()),
            phone: Some("+2348000000000".into()),
            method: DeliveryMethod::Delivery,
            address: Some("4 Allen Avenue, Ikeja".into()),
            instructions: None,
        },
        total,
    }
}

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub deps: DependenciesInject,
    pub registry: Registry,
}

impl Harness {
    pub fn new(strict_fan_out: bool) -> Self {
        Self::with_listings(catalogue(), strict_fan_out)
    }

    pub fn with_listings(listings: Vec<Listing>, strict_fan_out: bool) -> Self {
        let store = InMemoryStore::with_listings(listings);
        Self::with_repositories(store.clone(), store.repositories(), strict_fan_out)
    }

    /// Wires services over `repos`, which may wrap `store` in test doubles.
    pub fn with_repositories(
        store: Arc<InMemoryStore>,
        repos: Repositories,
        strict_fan_out: bool,
    ) -> Self {
        let mut registry = Registry::default();
        let deps = DependenciesInject::new(repos, strict_fan_out, &mut registry);

        Self {
            store,
            deps,
            registry,
        }
    }

    pub async fn checkout(&self, items: Vec<CreateOrderItemRequest>) -> CreateOrderResponse {
        self.deps
            .order_command
            .create_order(&customer(), &order_request(items))
            .await
            .expect("checkout should succeed")
            .data
    }

    pub fn order_status(&self, order_id: i32) -> OrderStatus {
        self.store
            .stored_order(order_id)
            .expect("order exists")
            .status
    }

    pub fn vendor_status(&self, vendor_order_id: i32) -> VendorOrderStatus {
        self.store
            .stored_vendor_order(vendor_order_id)
            .expect("sub-order exists")
            .vendor_status
    }
}
