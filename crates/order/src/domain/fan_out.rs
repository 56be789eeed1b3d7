//! Splits checkout lines into per-vendor groups.

use crate::model::listing::Listing;
use shared::errors::ServiceError;
use std::collections::HashMap;

/// A checkout line with its price/title snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub listing_id: i32,
    pub title: String,
    pub price: i64,
    pub quantity: i32,
}

impl OrderLine {
    /// `None` when price times quantity does not fit in an `i64`.
    pub fn line_total(&self) -> Option<i64> {
        self.price.checked_mul(i64::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorGroup {
    pub vendor_id: i32,
    pub lines: Vec<OrderLine>,
    pub subtotal: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutPlan {
    /// Groups in order of each vendor's first line.
    pub groups: Vec<VendorGroup>,
    /// Listing ids that could not be resolved to a vendor.
    pub unresolved: Vec<i32>,
}

impl FanOutPlan {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Groups `lines` by the vendor owning each listing. Snapshots are carried
/// over as submitted; the listing's live price is not consulted.
///
/// Fails with `BadRequest` when a line total or a vendor subtotal overflows.
pub fn plan_fan_out(
    lines: &[OrderLine],
    listings: &[Listing],
) -> Result<FanOutPlan, ServiceError> {
    let owners: HashMap<i32, i32> = listings
        .iter()
        .map(|listing| (listing.listing_id, listing.vendor_id))
        .collect();

    let mut plan = FanOutPlan::default();
    let mut positions: HashMap<i32, usize> = HashMap::new();

    for line in lines {
        let Some(&vendor_id) = owners.get(&line.listing_id) else {
            plan.unresolved.push(line.listing_id);
            continue;
        };

        let index = *positions.entry(vendor_id).or_insert_with(|| {
            plan.groups.push(VendorGroup {
                vendor_id,
                lines: Vec::new(),
                subtotal: 0,
            });
            plan.groups.len() - 1
        });

        let group = &mut plan.groups[index];
        group.subtotal = line
            .line_total()
            .and_then(|total| group.subtotal.checked_add(total))
            .ok_or_else(|| {
                ServiceError::BadRequest(format!(
                    "Amount too large for listing {}",
                    line.listing_id
                ))
            })?;
        group.lines.push(line.clone());
    }

    Ok(plan)
}
