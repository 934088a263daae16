use chrono::Utc;
use uuid::Uuid;

use crate::{
    checkout::{form, steps::CheckoutStep, totals},
    dto::checkout::{CheckoutView, DeliveryFormRequest, PaymentFormRequest, PlacedOrder},
    error::{AppError, AppResult},
    middleware::session::ShopperSession,
    models::{
        CartLineItem, CustomLoafItem, DeliveryDetails, Order, OrderStatus, OrderTotals,
        PaymentMethod, PaymentSplit, PaymentStatus,
    },
    response::ApiResponse,
    state::AppState,
    store::CheckoutSession,
};

fn checkout_view(session: &CheckoutSession) -> CheckoutView {
    let totals = session.cart.totals().clone();
    let split = totals::split_payment(totals.total);
    CheckoutView {
        step: session.progress.step(),
        delivery_complete: session.progress.delivery_complete(),
        payment_complete: session.progress.payment_complete(),
        form: session.form.clone(),
        totals,
        split,
        submitting: session.submitting,
    }
}

pub fn get_state(
    state: &AppState,
    shopper: &ShopperSession,
) -> AppResult<ApiResponse<CheckoutView>> {
    let session_id = shopper.session_id;
    let view = state.sessions.with(session_id, |session| {
        if session.progress.reset_if_resumed(session.cart.is_empty()) {
            tracing::debug!(session = %session_id, "checkout reset for a new order");
        }
        checkout_view(session)
    });
    Ok(ApiResponse::success(view, None))
}

pub fn save_delivery(
    state: &AppState,
    shopper: &ShopperSession,
    payload: DeliveryFormRequest,
) -> AppResult<ApiResponse<CheckoutView>> {
    let view = state
        .sessions
        .with(shopper.session_id, |session| -> AppResult<CheckoutView> {
            session.progress.reset_if_resumed(session.cart.is_empty());
            if session.progress.step() != CheckoutStep::Delivery {
                return Err(AppError::BadRequest("not on the delivery step".to_string()));
            }

            session.form.customer_name = payload.customer_name;
            session.form.customer_email = payload.customer_email;
            session.form.street = payload.street;
            session.form.delivery_phone = payload.phone;
            session.form.zone_id = payload.zone_id;
            session.form.delivery_date = payload.delivery_date;
            session.form.delivery_slot = payload.delivery_slot;

            let errors = form::validate_delivery(
                &session.form,
                &state.catalog.zones,
                &state.catalog.slots,
                Utc::now(),
            );
            if !errors.is_empty() {
                return Err(AppError::Validation(errors));
            }

            if let Some(zone) = session.form.zone_id.and_then(|id| state.catalog.zone(id)) {
                session.cart.set_delivery_zone(zone.clone());
            }

            session
                .progress
                .advance()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            Ok(checkout_view(session))
        })?;
    Ok(ApiResponse::success(view, None))
}

pub fn save_payment(
    state: &AppState,
    shopper: &ShopperSession,
    payload: PaymentFormRequest,
) -> AppResult<ApiResponse<CheckoutView>> {
    let view = state
        .sessions
        .with(shopper.session_id, |session| -> AppResult<CheckoutView> {
            session.progress.reset_if_resumed(session.cart.is_empty());
            if session.progress.step() != CheckoutStep::Payment {
                return Err(AppError::BadRequest("not on the payment step".to_string()));
            }

            session.form.payment_method = payload.payment_method;
            session.form.payment_phone = payload.payment_phone;
            session.form.terms_accepted = payload.terms_accepted;

            let errors = form::validate_payment(&session.form);
            if !errors.is_empty() {
                return Err(AppError::Validation(errors));
            }

            session
                .progress
                .advance()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            Ok(checkout_view(session))
        })?;
    Ok(ApiResponse::success(view, None))
}

pub fn go_back(state: &AppState, shopper: &ShopperSession) -> AppResult<ApiResponse<CheckoutView>> {
    let view = state
        .sessions
        .with(shopper.session_id, |session| -> AppResult<CheckoutView> {
            session.progress.reset_if_resumed(session.cart.is_empty());
            session
                .progress
                .back()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            Ok(checkout_view(session))
        })?;
    Ok(ApiResponse::success(view, None))
}

struct PreparedOrder {
    customer_name: String,
    customer_email: String,
    items: Vec<CartLineItem>,
    custom_loaves: Vec<CustomLoafItem>,
    totals: OrderTotals,
    split: PaymentSplit,
    delivery: DeliveryDetails,
    payment_method: PaymentMethod,
}

fn required<T>(value: Option<T>, field: &'static str) -> AppResult<T> {
    value.ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("validated field {field} is missing"))
    })
}

/// Submit the order: validate the full form, charge the deposit, persist a
/// snapshot, clear the cart, and advance to confirmation. A declined charge
/// is recoverable; the cart and form stay intact at the review step.
pub async fn place_order(
    state: &AppState,
    shopper: &ShopperSession,
) -> AppResult<ApiResponse<PlacedOrder>> {
    let session_id = shopper.session_id;

    let prepared = state
        .sessions
        .with(session_id, |session| -> AppResult<PreparedOrder> {
            session.progress.reset_if_resumed(session.cart.is_empty());
            if session.submitting {
                return Err(AppError::BadRequest(
                    "an order submission is already in progress".to_string(),
                ));
            }
            if session.progress.step() != CheckoutStep::Review {
                return Err(AppError::BadRequest(
                    "place the order from the review step".to_string(),
                ));
            }

            let errors = form::validate_review(
                &session.form,
                &state.catalog.zones,
                &state.catalog.slots,
                Utc::now(),
                session.cart.is_empty(),
            );
            if !errors.is_empty() {
                return Err(AppError::Validation(errors));
            }

            let zone = required(
                session
                    .form
                    .zone_id
                    .and_then(|id| state.catalog.zone(id))
                    .cloned(),
                "zone_id",
            )?;
            // Refresh the fee before snapshotting in case the zone changed.
            session.cart.set_delivery_zone(zone.clone());

            let totals = session.cart.totals().clone();
            let split = totals::split_payment(totals.total);
            let delivery = DeliveryDetails {
                street: required(session.form.street.clone(), "street")?,
                phone: required(session.form.delivery_phone.clone(), "delivery_phone")?,
                zone_id: zone.id,
                zone_name: zone.name,
                fee: zone.fee,
                date: required(session.form.delivery_date, "delivery_date")?,
                slot: required(session.form.delivery_slot.clone(), "delivery_slot")?,
            };

            let prepared = PreparedOrder {
                customer_name: required(session.form.customer_name.clone(), "customer_name")?,
                customer_email: required(session.form.customer_email.clone(), "customer_email")?,
                items: session.cart.items().to_vec(),
                custom_loaves: session.cart.custom_loaves().to_vec(),
                totals,
                split,
                delivery,
                payment_method: required(session.form.payment_method, "payment_method")?,
            };
            session.submitting = true;
            Ok(prepared)
        })?;

    // The charge is awaited outside the session lock; the `submitting` flag
    // keeps re-entrant submits out while it is pending.
    let charge = state
        .gateway
        .charge_deposit(prepared.split.paid_now, prepared.payment_method)
        .await;

    let receipt = match charge {
        Ok(receipt) => receipt,
        Err(err) => {
            state
                .sessions
                .with(session_id, |session| session.submitting = false);
            tracing::warn!(session = %session_id, error = %err, "deposit charge failed");
            return Err(AppError::PaymentFailed(err.to_string()));
        }
    };

    let now = Utc::now();
    let order_id = Uuid::new_v4();
    let order = Order {
        id: order_id,
        order_number: build_order_number(order_id),
        session_id,
        customer_name: prepared.customer_name,
        customer_email: prepared.customer_email,
        items: prepared.items,
        custom_loaves: prepared.custom_loaves,
        totals: prepared.totals,
        split: prepared.split,
        payment_reference: receipt.reference,
        delivery: prepared.delivery,
        payment_method: prepared.payment_method,
        payment_status: PaymentStatus::DepositPaid,
        status: OrderStatus::Received,
        created_at: now,
        updated_at: now,
    };

    state.orders.insert(order.clone());
    state.sessions.with(session_id, |session| {
        session.cart.clear();
        session.submitting = false;
        if let Err(err) = session.progress.confirm() {
            // The shopper navigated away mid-charge; the order stands.
            tracing::warn!(session = %session_id, error = %err, "could not advance to confirmation");
        }
    });

    tracing::info!(order = %order.order_number, total = order.totals.total, "order placed");
    Ok(ApiResponse::success(
        PlacedOrder {
            order,
            step: CheckoutStep::Confirmation,
        },
        None,
    ))
}

fn build_order_number(order_id: Uuid) -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = order_id.to_string();
    let short = &suffix[..8];
    format!("CKE-{date}-{short}")
}
