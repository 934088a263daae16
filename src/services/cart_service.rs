use uuid::Uuid;

use crate::{
    dto::cart::{
        AddCustomLoafRequest, AddItemRequest, ApplyPromotionRequest, CartView,
        UpdateQuantityRequest,
    },
    error::{AppError, AppResult},
    middleware::session::ShopperSession,
    models::{
        CartLineItem, CreamPick, CustomLoafItem, DecorationPick, LoafSelection, ToppingPick,
    },
    response::ApiResponse,
    state::AppState,
    store::CheckoutSession,
    tasks,
};

fn cart_view(session: &CheckoutSession) -> CartView {
    CartView {
        items: session.cart.items().to_vec(),
        custom_loaves: session.cart.custom_loaves().to_vec(),
        delivery_zone: session.cart.delivery_zone().cloned(),
        promotion_code: session.cart.promotion().map(|p| p.code.clone()),
        totals: session.cart.totals().clone(),
    }
}

/// Queue a best-effort mirror of the cart to the mock upstream. Never
/// blocks and never rolls the local mutation back.
fn mirror_cart(state: &AppState, session_id: Uuid, session: &CheckoutSession) {
    let gateway = state.gateway.clone();
    let totals = session.cart.totals().clone();
    tasks::spawn_best_effort("cart_mirror", async move {
        gateway.mirror_cart(session_id, totals).await
    });
}

pub fn view_cart(state: &AppState, shopper: &ShopperSession) -> AppResult<ApiResponse<CartView>> {
    let view = state
        .sessions
        .with(shopper.session_id, |session| cart_view(session));
    Ok(ApiResponse::success(view, None))
}

pub fn add_item(
    state: &AppState,
    shopper: &ShopperSession,
    payload: AddItemRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let cake = state
        .catalog
        .cake(payload.cake_id)
        .ok_or_else(|| AppError::BadRequest("cake not found".to_string()))?;
    if !cake.available {
        return Err(AppError::BadRequest("cake is not available".to_string()));
    }
    let size = cake
        .sizes
        .iter()
        .find(|s| s.label == payload.size)
        .ok_or_else(|| AppError::BadRequest("unknown size for this cake".to_string()))?;

    // Unknown cream/decoration references are dropped so they price at 0.
    let cream = payload
        .cream_id
        .and_then(|id| state.catalog.cream(id))
        .map(|c| CreamPick {
            id: c.id,
            name: c.name.clone(),
            price: c.price,
        });
    let decorations: Vec<DecorationPick> = payload
        .decoration_ids
        .iter()
        .filter_map(|&id| state.catalog.decoration(id))
        .map(|d| DecorationPick {
            id: d.id,
            name: d.name.clone(),
            price: d.price,
        })
        .collect();

    let item = CartLineItem {
        id: Uuid::new_v4(),
        cake_id: cake.id,
        cake_name: cake.name.clone(),
        size: size.clone(),
        cream,
        decorations,
        quantity: u32::try_from(payload.quantity).unwrap_or(u32::MAX),
        notes: payload.notes,
        reference_images: payload.reference_images,
        item_total: 0,
    };

    let view = state.sessions.with(shopper.session_id, |session| {
        session.cart.add_item(item);
        mirror_cart(state, shopper.session_id, session);
        cart_view(session)
    });
    Ok(ApiResponse::success(view, None))
}

pub fn update_quantity(
    state: &AppState,
    shopper: &ShopperSession,
    item_id: Uuid,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let (found, view) = state.sessions.with(shopper.session_id, |session| {
        let found = session.cart.update_quantity(item_id, payload.quantity);
        if found {
            mirror_cart(state, shopper.session_id, session);
        }
        (found, cart_view(session))
    });
    if !found {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success(view, None))
}

pub fn remove_item(
    state: &AppState,
    shopper: &ShopperSession,
    item_id: Uuid,
) -> AppResult<ApiResponse<CartView>> {
    let (removed, view) = state.sessions.with(shopper.session_id, |session| {
        let removed = session.cart.remove_item(item_id);
        if removed {
            mirror_cart(state, shopper.session_id, session);
        }
        (removed, cart_view(session))
    });
    if !removed {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success(view, None))
}

pub fn add_custom_loaf(
    state: &AppState,
    shopper: &ShopperSession,
    payload: AddCustomLoafRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }
    if payload.selections.is_empty() {
        return Err(AppError::BadRequest(
            "a custom loaf needs at least one flavor selection".to_string(),
        ));
    }
    let max = state.catalog.loaf.max_selections;
    if payload.selections.len() > max {
        return Err(AppError::BadRequest(format!(
            "a custom loaf takes at most {max} flavor selections"
        )));
    }

    let mut selections = Vec::with_capacity(payload.selections.len());
    for selection in &payload.selections {
        let flavor = state
            .catalog
            .flavor(selection.flavor_id)
            .ok_or_else(|| AppError::BadRequest("flavor not found".to_string()))?;
        // As with cart items, unknown addon references price at 0.
        let cream = selection
            .cream_id
            .and_then(|id| state.catalog.cream(id))
            .map(|c| CreamPick {
                id: c.id,
                name: c.name.clone(),
                price: c.price,
            });
        let topping = selection
            .topping_id
            .and_then(|id| state.catalog.topping(id))
            .map(|t| ToppingPick {
                id: t.id,
                name: t.name.clone(),
                price: t.price,
            });
        selections.push(LoafSelection {
            flavor_id: flavor.id,
            flavor_name: flavor.name.clone(),
            cream,
            topping,
        });
    }

    let loaf = CustomLoafItem {
        id: Uuid::new_v4(),
        base_price: state.catalog.loaf.base_price,
        selections,
        quantity: u32::try_from(payload.quantity).unwrap_or(u32::MAX),
        notes: payload.notes,
        item_total: 0,
    };

    let view = state.sessions.with(shopper.session_id, |session| {
        session.cart.add_custom_loaf(loaf);
        mirror_cart(state, shopper.session_id, session);
        cart_view(session)
    });
    Ok(ApiResponse::success(view, None))
}

pub fn remove_custom_loaf(
    state: &AppState,
    shopper: &ShopperSession,
    loaf_id: Uuid,
) -> AppResult<ApiResponse<CartView>> {
    let (removed, view) = state.sessions.with(shopper.session_id, |session| {
        let removed = session.cart.remove_custom_loaf(loaf_id);
        if removed {
            mirror_cart(state, shopper.session_id, session);
        }
        (removed, cart_view(session))
    });
    if !removed {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success(view, None))
}

pub fn apply_promotion(
    state: &AppState,
    shopper: &ShopperSession,
    payload: ApplyPromotionRequest,
) -> AppResult<ApiResponse<CartView>> {
    let promotion = state
        .catalog
        .promotion_by_code(&payload.code)
        .ok_or_else(|| AppError::BadRequest("invalid or inactive promo code".to_string()))?
        .clone();

    let view = state.sessions.with(shopper.session_id, |session| {
        session.cart.apply_promotion(promotion);
        mirror_cart(state, shopper.session_id, session);
        cart_view(session)
    });
    Ok(ApiResponse::success(view, None))
}

pub fn clear_cart(state: &AppState, shopper: &ShopperSession) -> AppResult<ApiResponse<CartView>> {
    let view = state.sessions.with(shopper.session_id, |session| {
        session.cart.clear();
        mirror_cart(state, shopper.session_id, session);
        cart_view(session)
    });
    Ok(ApiResponse::success(view, None))
}
