use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Cake, Cream, Decoration, DeliveryZone, Flavor, Topping};

#[derive(Debug, Serialize, ToSchema)]
pub struct CakeList {
    pub items: Vec<Cake>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DecorationList {
    pub items: Vec<Decoration>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ZoneList {
    pub items: Vec<DeliveryZone>,
}

/// Everything the storefront needs to render the custom loaf builder.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomLoafOptions {
    pub base_price: i64,
    pub max_selections: usize,
    pub flavors: Vec<Flavor>,
    pub creams: Vec<Cream>,
    pub toppings: Vec<Topping>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CalculateFeeRequest {
    pub zone_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeeData {
    pub zone_id: Uuid,
    pub zone_name: String,
    pub fee: i64,
}
