use uuid::Uuid;

use crate::{
    checkout::pricing,
    dto::orders::{OrderList, OrderSummary},
    error::{AppError, AppResult},
    middleware::session::ShopperSession,
    models::Order,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub fn list_orders(
    state: &AppState,
    shopper: &ShopperSession,
    pagination: Pagination,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = pagination.normalize();
    let (items, total) = state
        .orders
        .list_for_session(shopper.session_id, limit, offset);
    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(OrderList { items }, Some(meta)))
}

fn find_order(state: &AppState, shopper: &ShopperSession, id: Uuid) -> AppResult<Order> {
    state
        .orders
        .get(id)
        .filter(|o| o.session_id == shopper.session_id)
        .ok_or(AppError::NotFound)
}

pub fn get_order(
    state: &AppState,
    shopper: &ShopperSession,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    let order = find_order(state, shopper, id)?;
    Ok(ApiResponse::success(order, None))
}

/// Order plus per-item breakdowns, recomputed from the snapshot with the
/// same calculator the cart and review step used.
pub fn order_summary(
    state: &AppState,
    shopper: &ShopperSession,
    id: Uuid,
) -> AppResult<ApiResponse<OrderSummary>> {
    let order = find_order(state, shopper, id)?;
    let breakdowns = order
        .items
        .iter()
        .map(pricing::line_item)
        .chain(order.custom_loaves.iter().map(pricing::custom_loaf))
        .collect();
    Ok(ApiResponse::success(OrderSummary { order, breakdowns }, None))
}
