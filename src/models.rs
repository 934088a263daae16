use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Catalog reference data (read-only, seeded from fixtures at startup)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CakeSize {
    pub label: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Cake {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sizes: Vec<CakeSize>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Cream {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Decoration {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Flavor {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Topping {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeliveryZone {
    pub id: Uuid,
    pub name: String,
    pub fee: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Promotion {
    pub id: Uuid,
    pub code: String,
    pub discount: i64,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffUser {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Cart contents
//
// Line items carry price snapshots resolved against the catalog at add time,
// so the pricing functions stay pure and an order keeps the prices the
// shopper actually saw.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreamPick {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DecorationPick {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartLineItem {
    pub id: Uuid,
    pub cake_id: Uuid,
    pub cake_name: String,
    pub size: CakeSize,
    pub cream: Option<CreamPick>,
    pub decorations: Vec<DecorationPick>,
    pub quantity: u32,
    pub notes: Option<String>,
    pub reference_images: Vec<String>,
    /// Derived; kept in sync by the cart on every mutation.
    pub item_total: i64,
}

/// One cake slot inside a custom loaf bundle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoafSelection {
    pub flavor_id: Uuid,
    pub flavor_name: String,
    pub cream: Option<CreamPick>,
    pub topping: Option<ToppingPick>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToppingPick {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomLoafItem {
    pub id: Uuid,
    pub base_price: i64,
    pub selections: Vec<LoafSelection>,
    pub quantity: u32,
    pub notes: Option<String>,
    pub item_total: i64,
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderTotals {
    pub subtotal: i64,
    pub custom_loaf_subtotal: i64,
    pub custom_loaf_count: u32,
    pub items_count: u32,
    pub discount: i64,
    /// None until a delivery zone has been chosen.
    pub delivery_fee: Option<i64>,
    pub total: i64,
}

/// The storefront's pay-half-now policy. `paid_now + remaining == total`
/// for every integer total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaymentSplit {
    pub paid_now: i64,
    pub remaining: i64,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received,
    InProgress,
    Ready,
    Dispatched,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal statuses cannot be transitioned away from.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    MobileMoney,
    CashOnDelivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    DepositPaid,
    PaidInFull,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeliveryDetails {
    pub street: String,
    pub phone: String,
    pub zone_id: Uuid,
    pub zone_name: String,
    pub fee: i64,
    pub date: NaiveDate,
    pub slot: String,
}

/// Persisted result of a successful checkout. The pricing snapshot is
/// immutable once created; only the fulfilment `status` may change.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub session_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<CartLineItem>,
    pub custom_loaves: Vec<CustomLoafItem>,
    pub totals: OrderTotals,
    pub split: PaymentSplit,
    pub payment_reference: String,
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
