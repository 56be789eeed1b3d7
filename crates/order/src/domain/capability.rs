//! Who may do what. Services call these before touching state; the
//! aggregators never see an actor.

use crate::domain::{
    actor::{Actor, Role},
    status::OrderStatus,
};
use shared::errors::ServiceError;

/// Orders are visible to their owner and to admins. Anyone else gets the
/// same answer as for a missing order.
pub fn can_view_order(actor: &Actor, owner_id: i32) -> bool {
    actor.role == Role::Admin || actor.user_id == owner_id
}

/// Sub-orders are visible only to the vendor that owns them.
pub fn owns_vendor_order(actor: &Actor, vendor_id: i32) -> bool {
    actor.role == Role::Vendor && actor.user_id == vendor_id
}

pub fn authorize_order_status_change(
    actor: &Actor,
    owner_id: i32,
    current: OrderStatus,
    target: OrderStatus,
) -> Result<(), ServiceError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Vendor => Err(ServiceError::Forbidden(
            "Vendors cannot change order status".into(),
        )),
        Role::Customer => {
            if actor.user_id != owner_id {
                return Err(ServiceError::NotFound("Order not found".into()));
            }
            if target != OrderStatus::Cancelled {
                return Err(ServiceError::Forbidden(
                    "Customers can only cancel orders".into(),
                ));
            }
            if current != OrderStatus::Pending {
                return Err(ServiceError::BadRequest(format!(
                    "Order cannot be cancelled once it is {current}"
                )));
            }
            Ok(())
        }
    }
}
