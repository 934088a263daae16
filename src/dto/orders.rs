use serde::Serialize;
use utoipa::ToSchema;

use crate::checkout::pricing::PriceBreakdown;
use crate::models::Order;

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

/// An order plus the per-item price breakdowns, computed with the same
/// calculator the cart and review step use.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummary {
    pub order: Order,
    pub breakdowns: Vec<PriceBreakdown>,
}
