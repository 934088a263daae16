use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};

use crate::{
    dto::checkout::{CheckoutView, DeliveryFormRequest, PaymentFormRequest, PlacedOrder},
    error::AppResult,
    middleware::session::ShopperSession,
    response::ApiResponse,
    services::checkout_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_state))
        .route("/delivery", put(save_delivery))
        .route("/payment", put(save_payment))
        .route("/back", post(go_back))
        .route("/submit", post(submit))
}

#[utoipa::path(
    get,
    path = "/api/checkout",
    responses(
        (status = 200, description = "Current step, form and totals", body = ApiResponse<CheckoutView>)
    ),
    tag = "Checkout"
)]
pub async fn get_state(
    State(state): State<AppState>,
    shopper: ShopperSession,
) -> AppResult<Json<ApiResponse<CheckoutView>>> {
    let resp = checkout_service::get_state(&state, &shopper)?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/checkout/delivery",
    request_body = DeliveryFormRequest,
    responses(
        (status = 200, description = "Delivery details saved; moved to payment", body = ApiResponse<CheckoutView>),
        (status = 400, description = "Validation failed; per-field detail in data.fields"),
    ),
    tag = "Checkout"
)]
pub async fn save_delivery(
    State(state): State<AppState>,
    shopper: ShopperSession,
    Json(payload): Json<DeliveryFormRequest>,
) -> AppResult<Json<ApiResponse<CheckoutView>>> {
    let resp = checkout_service::save_delivery(&state, &shopper, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/checkout/payment",
    request_body = PaymentFormRequest,
    responses(
        (status = 200, description = "Payment details saved; moved to review", body = ApiResponse<CheckoutView>),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Checkout"
)]
pub async fn save_payment(
    State(state): State<AppState>,
    shopper: ShopperSession,
    Json(payload): Json<PaymentFormRequest>,
) -> AppResult<Json<ApiResponse<CheckoutView>>> {
    let resp = checkout_service::save_payment(&state, &shopper, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/checkout/back",
    responses(
        (status = 200, description = "Step back one stage", body = ApiResponse<CheckoutView>),
        (status = 400, description = "Already at the first step or confirmed"),
    ),
    tag = "Checkout"
)]
pub async fn go_back(
    State(state): State<AppState>,
    shopper: ShopperSession,
) -> AppResult<Json<ApiResponse<CheckoutView>>> {
    let resp = checkout_service::go_back(&state, &shopper)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/checkout/submit",
    responses(
        (status = 200, description = "Order placed; deposit charged", body = ApiResponse<PlacedOrder>),
        (status = 400, description = "Not on the review step, or validation failed"),
        (status = 402, description = "Deposit charge declined; retry from review"),
    ),
    tag = "Checkout"
)]
pub async fn submit(
    State(state): State<AppState>,
    shopper: ShopperSession,
) -> AppResult<Json<ApiResponse<PlacedOrder>>> {
    let resp = checkout_service::place_order(&state, &shopper).await?;
    Ok(Json(resp))
}
