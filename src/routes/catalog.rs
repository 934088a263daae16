use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::catalog::{
        CakeList, CalculateFeeRequest, CustomLoafOptions, DecorationList, FeeData, ZoneList,
    },
    error::AppResult,
    models::Cake,
    response::ApiResponse,
    routes::params::CakeQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cakes", get(list_cakes))
        .route("/cakes/{id}", get(get_cake))
        .route("/decorations", get(list_decorations))
        .route("/custom-loaf/options", get(custom_loaf_options))
        .route("/delivery-zones", get(list_zones))
        .route("/delivery-zones/calculate-fee", post(calculate_fee))
}

#[utoipa::path(
    get,
    path = "/api/cakes",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Name filter")
    ),
    responses(
        (status = 200, description = "List available cakes", body = ApiResponse<CakeList>)
    ),
    tag = "Catalog"
)]
pub async fn list_cakes(
    State(state): State<AppState>,
    Query(query): Query<CakeQuery>,
) -> AppResult<Json<ApiResponse<CakeList>>> {
    let resp = catalog_service::list_cakes(&state, query)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/cakes/{id}",
    params(("id" = Uuid, Path, description = "Cake ID")),
    responses(
        (status = 200, description = "Cake with its sizes", body = ApiResponse<Cake>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Catalog"
)]
pub async fn get_cake(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Cake>>> {
    let resp = catalog_service::get_cake(&state, id)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/decorations",
    responses(
        (status = 200, description = "List decorations", body = ApiResponse<DecorationList>)
    ),
    tag = "Catalog"
)]
pub async fn list_decorations(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DecorationList>>> {
    let resp = catalog_service::list_decorations(&state)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/custom-loaf/options",
    responses(
        (status = 200, description = "Flavors, creams and toppings for the loaf builder", body = ApiResponse<CustomLoafOptions>)
    ),
    tag = "Catalog"
)]
pub async fn custom_loaf_options(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CustomLoafOptions>>> {
    let resp = catalog_service::custom_loaf_options(&state)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/delivery-zones",
    responses(
        (status = 200, description = "List delivery zones with fees", body = ApiResponse<ZoneList>)
    ),
    tag = "Catalog"
)]
pub async fn list_zones(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ZoneList>>> {
    let resp = catalog_service::list_zones(&state)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/delivery-zones/calculate-fee",
    request_body = CalculateFeeRequest,
    responses(
        (status = 200, description = "Flat fee for the zone", body = ApiResponse<FeeData>),
        (status = 404, description = "Unknown zone"),
    ),
    tag = "Catalog"
)]
pub async fn calculate_fee(
    State(state): State<AppState>,
    Json(payload): Json<CalculateFeeRequest>,
) -> AppResult<Json<ApiResponse<FeeData>>> {
    let resp = catalog_service::calculate_fee(&state, payload)?;
    Ok(Json(resp))
}
