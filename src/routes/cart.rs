use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::cart::{
        AddCustomLoafRequest, AddItemRequest, ApplyPromotionRequest, CartView,
        UpdateQuantityRequest,
    },
    error::AppResult,
    middleware::session::ShopperSession,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).delete(clear_cart))
        .route("/items", post(add_item))
        .route("/items/{id}", delete(remove_item).patch(update_quantity))
        .route("/custom-loaves", post(add_custom_loaf))
        .route("/custom-loaves/{id}", delete(remove_custom_loaf))
        .route("/promotion", post(apply_promotion))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    params(("x-session-id" = String, Header, description = "Shopper session UUID")),
    responses(
        (status = 200, description = "Current cart with derived totals", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    shopper: ShopperSession,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::view_cart(&state, &shopper)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Add a configured cake to the cart", body = ApiResponse<CartView>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    shopper: ShopperSession,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::add_item(&state, &shopper, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items/{id}",
    params(("id" = Uuid, Path, description = "Cart line item ID")),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Update quantity; zero or less removes the item", body = ApiResponse<CartView>),
        (status = 404, description = "Item not in cart"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    shopper: ShopperSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::update_quantity(&state, &shopper, id, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(("id" = Uuid, Path, description = "Cart line item ID")),
    responses(
        (status = 200, description = "Remove the item", body = ApiResponse<CartView>),
        (status = 404, description = "Item not in cart"),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    shopper: ShopperSession,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_item(&state, &shopper, id)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/custom-loaves",
    request_body = AddCustomLoafRequest,
    responses(
        (status = 200, description = "Add a custom loaf bundle", body = ApiResponse<CartView>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Cart"
)]
pub async fn add_custom_loaf(
    State(state): State<AppState>,
    shopper: ShopperSession,
    Json(payload): Json<AddCustomLoafRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::add_custom_loaf(&state, &shopper, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/custom-loaves/{id}",
    params(("id" = Uuid, Path, description = "Custom loaf ID")),
    responses(
        (status = 200, description = "Remove the custom loaf", body = ApiResponse<CartView>),
        (status = 404, description = "Custom loaf not in cart"),
    ),
    tag = "Cart"
)]
pub async fn remove_custom_loaf(
    State(state): State<AppState>,
    shopper: ShopperSession,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_custom_loaf(&state, &shopper, id)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/promotion",
    request_body = ApplyPromotionRequest,
    responses(
        (status = 200, description = "Apply a promo code", body = ApiResponse<CartView>),
        (status = 400, description = "Invalid or inactive code"),
    ),
    tag = "Cart"
)]
pub async fn apply_promotion(
    State(state): State<AppState>,
    shopper: ShopperSession,
    Json(payload): Json<ApplyPromotionRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::apply_promotion(&state, &shopper, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Clear the cart", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    shopper: ShopperSession,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::clear_cart(&state, &shopper)?;
    Ok(Json(resp))
}
