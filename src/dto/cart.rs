use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{CartLineItem, CustomLoafItem, DeliveryZone, OrderTotals};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub cake_id: Uuid,
    /// Size label, e.g. "8-inch".
    pub size: String,
    pub cream_id: Option<Uuid>,
    #[serde(default)]
    pub decoration_ids: Vec<Uuid>,
    pub quantity: i64,
    pub notes: Option<String>,
    #[serde(default)]
    pub reference_images: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoafSelectionRequest {
    pub flavor_id: Uuid,
    pub cream_id: Option<Uuid>,
    pub topping_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCustomLoafRequest {
    pub selections: Vec<LoafSelectionRequest>,
    pub quantity: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyPromotionRequest {
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLineItem>,
    pub custom_loaves: Vec<CustomLoafItem>,
    pub delivery_zone: Option<DeliveryZone>,
    pub promotion_code: Option<String>,
    pub totals: OrderTotals,
}
