use uuid::Uuid;

use crate::{
    dto::catalog::{
        CakeList, CalculateFeeRequest, CustomLoafOptions, DecorationList, FeeData, ZoneList,
    },
    error::{AppError, AppResult},
    models::Cake,
    response::{ApiResponse, Meta},
    routes::params::CakeQuery,
    state::AppState,
};

pub fn list_cakes(state: &AppState, query: CakeQuery) -> AppResult<ApiResponse<CakeList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let needle = query.q.as_deref().map(str::to_lowercase);

    let matches: Vec<&Cake> = state
        .catalog
        .cakes
        .iter()
        .filter(|c| c.available)
        .filter(|c| {
            needle
                .as_deref()
                .is_none_or(|q| c.name.to_lowercase().contains(q))
        })
        .collect();

    let total = matches.len() as i64;
    let items = matches
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(CakeList { items }, Some(meta)))
}

pub fn get_cake(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Cake>> {
    let cake = state.catalog.cake(id).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(cake.clone(), None))
}

pub fn list_decorations(state: &AppState) -> AppResult<ApiResponse<DecorationList>> {
    Ok(ApiResponse::success(
        DecorationList {
            items: state.catalog.decorations.clone(),
        },
        None,
    ))
}

pub fn custom_loaf_options(state: &AppState) -> AppResult<ApiResponse<CustomLoafOptions>> {
    Ok(ApiResponse::success(
        CustomLoafOptions {
            base_price: state.catalog.loaf.base_price,
            max_selections: state.catalog.loaf.max_selections,
            flavors: state.catalog.flavors.clone(),
            creams: state.catalog.creams.clone(),
            toppings: state.catalog.toppings.clone(),
        },
        None,
    ))
}

pub fn list_zones(state: &AppState) -> AppResult<ApiResponse<ZoneList>> {
    Ok(ApiResponse::success(
        ZoneList {
            items: state.catalog.zones.clone(),
        },
        None,
    ))
}

pub fn calculate_fee(
    state: &AppState,
    payload: CalculateFeeRequest,
) -> AppResult<ApiResponse<FeeData>> {
    let zone = state.catalog.zone(payload.zone_id).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        FeeData {
            zone_id: zone.id,
            zone_name: zone.name.clone(),
            fee: zone.fee,
        },
        None,
    ))
}
