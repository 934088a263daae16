use chrono::{Duration, Utc};
use uuid::Uuid;

use cakeshop_api::{
    checkout::steps::CheckoutStep,
    config::{ApiMode, AppConfig},
    dto::{
        cart::{AddItemRequest, ApplyPromotionRequest},
        checkout::{DeliveryFormRequest, PaymentFormRequest},
    },
    error::AppError,
    middleware::session::ShopperSession,
    models::{Cake, DeliveryZone, OrderStatus, PaymentMethod},
    routes::params::Pagination,
    services::{cart_service, checkout_service, order_service},
    state::AppState,
};

fn test_state(payment_failure_rate: f64) -> AppState {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        api_mode: ApiMode::Mock,
        upstream_base_url: "http://localhost:4000".to_string(),
        payment_failure_rate,
        upstream_delay_ms: 0,
    };
    AppState::new(config).expect("seed state")
}

fn shopper() -> ShopperSession {
    ShopperSession {
        session_id: Uuid::new_v4(),
    }
}

fn cake_by_name<'a>(state: &'a AppState, name: &str) -> &'a Cake {
    state
        .catalog
        .cakes
        .iter()
        .find(|c| c.name == name)
        .expect("fixture cake")
}

fn zone_by_name<'a>(state: &'a AppState, name: &str) -> &'a DeliveryZone {
    state
        .catalog
        .zones
        .iter()
        .find(|z| z.name == name)
        .expect("fixture zone")
}

// Base 1500 + cream 50 + decorations 80 and 40, qty 2 -> 3340.
fn scenario_add_item(state: &AppState, shopper: &ShopperSession) {
    let cake = cake_by_name(state, "Vanilla Celebration");
    let cream = state
        .catalog
        .creams
        .iter()
        .find(|c| c.name == "Whipped vanilla")
        .expect("fixture cream");
    let flowers = state
        .catalog
        .decorations
        .iter()
        .find(|d| d.name == "Sugar flowers")
        .expect("fixture decoration");
    let gold = state
        .catalog
        .decorations
        .iter()
        .find(|d| d.name == "Gold leaf")
        .expect("fixture decoration");

    cart_service::add_item(
        state,
        shopper,
        AddItemRequest {
            cake_id: cake.id,
            size: "6-inch".to_string(),
            cream_id: Some(cream.id),
            decoration_ids: vec![flowers.id, gold.id],
            quantity: 2,
            notes: None,
            reference_images: Vec::new(),
        },
    )
    .expect("add item");
}

fn fill_delivery(state: &AppState, shopper: &ShopperSession) {
    let zone = zone_by_name(state, "Westlands");
    checkout_service::save_delivery(
        state,
        shopper,
        DeliveryFormRequest {
            customer_name: Some("Amina K".to_string()),
            customer_email: Some("amina@example.com".to_string()),
            street: Some("14 Peponi Road".to_string()),
            phone: Some("+254712345678".to_string()),
            zone_id: Some(zone.id),
            delivery_date: Some((Utc::now() + Duration::days(3)).date_naive()),
            delivery_slot: Some("09:00-12:00".to_string()),
        },
    )
    .expect("save delivery");
}

fn fill_payment(state: &AppState, shopper: &ShopperSession) {
    checkout_service::save_payment(
        state,
        shopper,
        PaymentFormRequest {
            payment_method: Some(PaymentMethod::MobileMoney),
            payment_phone: Some("0712345678".to_string()),
            terms_accepted: true,
        },
    )
    .expect("save payment");
}

// Full flow: configure a cake, apply a promo, walk the wizard, place the
// order, and check the persisted snapshot against the cart the shopper saw.
#[tokio::test]
async fn full_checkout_flow_places_an_order() -> anyhow::Result<()> {
    let state = test_state(0.0);
    let shopper = shopper();

    scenario_add_item(&state, &shopper);

    let view = cart_service::apply_promotion(
        &state,
        &shopper,
        ApplyPromotionRequest {
            code: "welcome200".to_string(),
        },
    )?;
    let totals = view.data.expect("cart view").totals;
    assert_eq!(totals.subtotal, 3340);

    fill_delivery(&state, &shopper);

    let view = checkout_service::save_payment(
        &state,
        &shopper,
        PaymentFormRequest {
            payment_method: Some(PaymentMethod::MobileMoney),
            payment_phone: Some("0712345678".to_string()),
            terms_accepted: true,
        },
    )?;
    let checkout = view.data.expect("checkout view");
    assert_eq!(checkout.step, CheckoutStep::Review);
    // subtotal 3340 - discount 200 + Westlands fee 300
    assert_eq!(checkout.totals.total, 3440);
    assert_eq!(checkout.split.paid_now, 1720);
    assert_eq!(checkout.split.remaining, 1720);

    let placed = checkout_service::place_order(&state, &shopper)
        .await?
        .data
        .expect("placed order");
    assert_eq!(placed.step, CheckoutStep::Confirmation);
    assert_eq!(placed.order.status, OrderStatus::Received);
    assert_eq!(placed.order.totals.total, 3440);
    assert_eq!(placed.order.split.paid_now + placed.order.split.remaining, 3440);
    assert!(placed.order.order_number.starts_with("CKE-"));

    let cart = cart_service::view_cart(&state, &shopper)?.data.expect("cart");
    assert!(cart.items.is_empty());

    let checkout = checkout_service::get_state(&state, &shopper)?
        .data
        .expect("checkout view");
    assert_eq!(checkout.step, CheckoutStep::Confirmation);

    let orders = order_service::list_orders(
        &state,
        &shopper,
        Pagination {
            page: None,
            per_page: None,
        },
    )?
    .data
    .expect("order list");
    assert_eq!(orders.items.len(), 1);
    assert_eq!(orders.items[0].id, placed.order.id);

    let summary = order_service::order_summary(&state, &shopper, placed.order.id)?
        .data
        .expect("order summary");
    assert_eq!(summary.breakdowns[0].item_total, 3340);

    Ok(())
}

#[tokio::test]
async fn declined_payment_keeps_cart_and_review_step() {
    let state = test_state(1.0);
    let shopper = shopper();

    scenario_add_item(&state, &shopper);
    fill_delivery(&state, &shopper);
    fill_payment(&state, &shopper);

    let result = checkout_service::place_order(&state, &shopper).await;
    match result {
        Err(AppError::PaymentFailed(message)) => assert!(!message.is_empty()),
        other => panic!("expected payment failure, got {other:?}"),
    }

    let checkout = checkout_service::get_state(&state, &shopper)
        .expect("checkout state")
        .data
        .expect("checkout view");
    assert_eq!(checkout.step, CheckoutStep::Review);
    assert!(!checkout.submitting);
    // delivery/payment data survives for the retry
    assert_eq!(checkout.form.customer_name.as_deref(), Some("Amina K"));

    let cart = cart_service::view_cart(&state, &shopper)
        .expect("cart")
        .data
        .expect("cart view");
    assert!(!cart.items.is_empty());
}

#[tokio::test]
async fn adding_items_after_confirmation_resets_checkout() -> anyhow::Result<()> {
    let state = test_state(0.0);
    let shopper = shopper();

    scenario_add_item(&state, &shopper);
    fill_delivery(&state, &shopper);
    fill_payment(&state, &shopper);
    checkout_service::place_order(&state, &shopper).await?;

    // second order in the same session
    scenario_add_item(&state, &shopper);

    let checkout = checkout_service::get_state(&state, &shopper)?
        .data
        .expect("checkout view");
    assert_eq!(checkout.step, CheckoutStep::Delivery);
    assert!(!checkout.delivery_complete);

    Ok(())
}

#[tokio::test]
async fn steps_cannot_be_skipped() {
    let state = test_state(0.0);
    let shopper = shopper();

    scenario_add_item(&state, &shopper);

    let result = checkout_service::save_payment(
        &state,
        &shopper,
        PaymentFormRequest {
            payment_method: Some(PaymentMethod::CashOnDelivery),
            payment_phone: None,
            terms_accepted: true,
        },
    );
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = checkout_service::place_order(&state, &shopper).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn incomplete_delivery_form_reports_field_errors() {
    let state = test_state(0.0);
    let shopper = shopper();

    scenario_add_item(&state, &shopper);

    let result = checkout_service::save_delivery(
        &state,
        &shopper,
        DeliveryFormRequest {
            customer_name: Some("Amina K".to_string()),
            customer_email: None,
            street: None,
            phone: Some("bad".to_string()),
            zone_id: None,
            delivery_date: None,
            delivery_slot: None,
        },
    );
    match result {
        Err(AppError::Validation(fields)) => {
            assert!(fields.iter().any(|f| f.field == "street"));
            assert!(fields.iter().any(|f| f.field == "delivery_phone"));
            assert!(fields.iter().any(|f| f.field == "zone_id"));
        }
        other => panic!("expected validation errors, got {other:?}"),
    }

    // still on the delivery step
    let checkout = checkout_service::get_state(&state, &shopper)
        .expect("checkout state")
        .data
        .expect("checkout view");
    assert_eq!(checkout.step, CheckoutStep::Delivery);
}

#[tokio::test]
async fn unknown_order_renders_not_found() {
    let state = test_state(0.0);
    let shopper = shopper();
    let result = order_service::get_order(&state, &shopper, Uuid::new_v4());
    assert!(matches!(result, Err(AppError::NotFound)));
}
