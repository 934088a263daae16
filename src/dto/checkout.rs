use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    checkout::{form::CheckoutForm, steps::CheckoutStep},
    models::{Order, OrderTotals, PaymentMethod, PaymentSplit},
};

/// Delivery step form. Fields are optional at the wire level so the
/// validator can report every missing field at once instead of serde
/// rejecting the body outright.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeliveryFormRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub street: Option<String>,
    pub phone: Option<String>,
    pub zone_id: Option<Uuid>,
    pub delivery_date: Option<NaiveDate>,
    pub delivery_slot: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentFormRequest {
    pub payment_method: Option<PaymentMethod>,
    pub payment_phone: Option<String>,
    #[serde(default)]
    pub terms_accepted: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutView {
    pub step: CheckoutStep,
    pub delivery_complete: bool,
    pub payment_complete: bool,
    pub form: CheckoutForm,
    pub totals: OrderTotals,
    pub split: PaymentSplit,
    pub submitting: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlacedOrder {
    pub order: Order,
    pub step: CheckoutStep,
}
