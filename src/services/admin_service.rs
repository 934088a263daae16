use uuid::Uuid;

use crate::{
    dto::orders::OrderList,
    error::{AppError, AppResult},
    middleware::auth::{AuthStaff, ensure_admin},
    models::Order,
    response::{ApiResponse, Meta},
    routes::admin::UpdateOrderStatusRequest,
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

pub fn list_all_orders(
    state: &AppState,
    staff: &AuthStaff,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(staff)?;
    let (page, limit, offset) = query.pagination.normalize();
    let newest_first = !matches!(query.sort_order, Some(SortOrder::Asc));
    let (items, total) = state.orders.list(query.status, newest_first, limit, offset);
    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(OrderList { items }, Some(meta)))
}

pub fn get_order_admin(
    state: &AppState,
    staff: &AuthStaff,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(staff)?;
    let order = state.orders.get(id).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(order, None))
}

/// Fulfilment statuses are freely settable from the back office, with one
/// guard: delivered and cancelled orders stay where they are.
pub fn update_order_status(
    state: &AppState,
    staff: &AuthStaff,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(staff)?;

    let current = state.orders.get(id).ok_or(AppError::NotFound)?;
    if current.status.is_terminal() && payload.status != current.status {
        return Err(AppError::BadRequest(
            "delivered or cancelled orders cannot change status".to_string(),
        ));
    }

    let updated = state
        .orders
        .update_status(id, payload.status)
        .ok_or(AppError::NotFound)?;
    tracing::info!(order = %updated.order_number, status = ?updated.status, "order status updated");
    Ok(ApiResponse::success(updated, None))
}
