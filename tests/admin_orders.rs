use chrono::{Duration, Utc};
use uuid::Uuid;

use cakeshop_api::{
    config::{ApiMode, AppConfig},
    dto::{cart::AddItemRequest, checkout::{DeliveryFormRequest, PaymentFormRequest}},
    error::AppError,
    middleware::auth::AuthStaff,
    middleware::session::ShopperSession,
    models::{Order, OrderStatus, PaymentMethod},
    routes::admin::UpdateOrderStatusRequest,
    routes::params::{OrderListQuery, Pagination},
    services::{admin_service, cart_service, checkout_service},
    state::AppState,
};

fn test_state() -> AppState {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        api_mode: ApiMode::Mock,
        upstream_base_url: "http://localhost:4000".to_string(),
        payment_failure_rate: 0.0,
        upstream_delay_ms: 0,
    };
    AppState::new(config).expect("seed state")
}

fn admin() -> AuthStaff {
    AuthStaff {
        staff_id: Uuid::new_v4(),
        role: "admin".to_string(),
    }
}

async fn place_order(state: &AppState) -> Order {
    let shopper = ShopperSession {
        session_id: Uuid::new_v4(),
    };
    let cake = state.catalog.cakes.first().expect("fixture cake");
    let zone = state.catalog.zones.first().expect("fixture zone");

    cart_service::add_item(
        state,
        &shopper,
        AddItemRequest {
            cake_id: cake.id,
            size: cake.sizes[0].label.clone(),
            cream_id: None,
            decoration_ids: Vec::new(),
            quantity: 1,
            notes: None,
            reference_images: Vec::new(),
        },
    )
    .expect("add item");

    checkout_service::save_delivery(
        state,
        &shopper,
        DeliveryFormRequest {
            customer_name: Some("Brian O".to_string()),
            customer_email: Some("brian@example.com".to_string()),
            street: Some("2 Riverside Drive".to_string()),
            phone: Some("0712345678".to_string()),
            zone_id: Some(zone.id),
            delivery_date: Some((Utc::now() + Duration::days(2)).date_naive()),
            delivery_slot: Some("12:00-15:00".to_string()),
        },
    )
    .expect("save delivery");

    checkout_service::save_payment(
        state,
        &shopper,
        PaymentFormRequest {
            payment_method: Some(PaymentMethod::CashOnDelivery),
            payment_phone: None,
            terms_accepted: true,
        },
    )
    .expect("save payment");

    checkout_service::place_order(state, &shopper)
        .await
        .expect("place order")
        .data
        .expect("placed order")
        .order
}

#[tokio::test]
async fn admin_walks_an_order_through_fulfilment() -> anyhow::Result<()> {
    let state = test_state();
    let staff = admin();
    let order = place_order(&state).await;

    for status in [
        OrderStatus::InProgress,
        OrderStatus::Ready,
        OrderStatus::Dispatched,
        OrderStatus::Delivered,
    ] {
        let updated = admin_service::update_order_status(
            &state,
            &staff,
            order.id,
            UpdateOrderStatusRequest { status },
        )?
        .data
        .expect("updated order");
        assert_eq!(updated.status, status);
        // pricing snapshot never changes
        assert_eq!(updated.totals, order.totals);
    }

    // delivered is terminal
    let result = admin_service::update_order_status(
        &state,
        &staff,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Received,
        },
    );
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test]
async fn order_listing_filters_by_status() -> anyhow::Result<()> {
    let state = test_state();
    let staff = admin();
    let first = place_order(&state).await;
    let _second = place_order(&state).await;

    admin_service::update_order_status(
        &state,
        &staff,
        first.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Ready,
        },
    )?;

    let ready = admin_service::list_all_orders(
        &state,
        &staff,
        OrderListQuery {
            pagination: Pagination {
                page: None,
                per_page: None,
            },
            status: Some(OrderStatus::Ready),
            sort_order: None,
        },
    )?
    .data
    .expect("order list");
    assert_eq!(ready.items.len(), 1);
    assert_eq!(ready.items[0].id, first.id);

    let all = admin_service::list_all_orders(
        &state,
        &staff,
        OrderListQuery {
            pagination: Pagination {
                page: None,
                per_page: None,
            },
            status: None,
            sort_order: None,
        },
    )?
    .data
    .expect("order list");
    assert_eq!(all.items.len(), 2);

    Ok(())
}

#[tokio::test]
async fn non_admin_staff_is_forbidden() {
    let state = test_state();
    let staff = AuthStaff {
        staff_id: Uuid::new_v4(),
        role: "baker".to_string(),
    };

    let result = admin_service::list_all_orders(
        &state,
        &staff,
        OrderListQuery {
            pagination: Pagination {
                page: None,
                per_page: None,
            },
            status: None,
            sort_order: None,
        },
    );
    assert!(matches!(result, Err(AppError::Forbidden)));
}
