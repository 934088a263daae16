use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::FieldError,
    models::{DeliveryZone, PaymentMethod},
};

/// Deliveries need at least this much notice.
pub const MIN_LEAD_HOURS: i64 = 24;

/// Accumulating, partially-filled checkout record. Fields stay `None` until
/// the shopper fills the step that owns them; each step's validator decides
/// what must be present before the wizard moves on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CheckoutForm {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub street: Option<String>,
    pub delivery_phone: Option<String>,
    pub zone_id: Option<Uuid>,
    pub delivery_date: Option<NaiveDate>,
    pub delivery_slot: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_phone: Option<String>,
    pub terms_accepted: bool,
}

pub fn validate_delivery(
    form: &CheckoutForm,
    zones: &[DeliveryZone],
    slots: &[String],
    now: DateTime<Utc>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.customer_name.as_deref().is_none_or(|s| s.trim().is_empty()) {
        errors.push(FieldError::new("customer_name", "name is required"));
    }
    match form.customer_email.as_deref() {
        None => errors.push(FieldError::new("customer_email", "email is required")),
        Some(email) if !looks_like_email(email) => {
            errors.push(FieldError::new("customer_email", "enter a valid email address"));
        }
        Some(_) => {}
    }

    if form.street.as_deref().is_none_or(|s| s.trim().is_empty()) {
        errors.push(FieldError::new("street", "street address is required"));
    }
    match form.delivery_phone.as_deref() {
        None => errors.push(FieldError::new("delivery_phone", "phone number is required")),
        Some(phone) if !valid_phone(phone) => {
            errors.push(FieldError::new("delivery_phone", "enter a valid phone number"));
        }
        Some(_) => {}
    }

    match form.zone_id {
        None => errors.push(FieldError::new("zone_id", "choose a delivery zone")),
        Some(id) if !zones.iter().any(|z| z.id == id) => {
            errors.push(FieldError::new("zone_id", "unknown delivery zone"));
        }
        Some(_) => {}
    }

    match form.delivery_date {
        None => errors.push(FieldError::new("delivery_date", "choose a delivery date")),
        Some(date) => {
            let earliest = (now + Duration::hours(MIN_LEAD_HOURS)).date_naive();
            if date < earliest {
                errors.push(FieldError::new(
                    "delivery_date",
                    format!("deliveries need at least {MIN_LEAD_HOURS} hours notice"),
                ));
            }
        }
    }

    match form.delivery_slot.as_deref() {
        None => errors.push(FieldError::new("delivery_slot", "choose a delivery time")),
        Some(slot) if !slots.iter().any(|s| s == slot) => {
            errors.push(FieldError::new("delivery_slot", "unknown delivery time slot"));
        }
        Some(_) => {}
    }

    errors
}

pub fn validate_payment(form: &CheckoutForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    match form.payment_method {
        None => errors.push(FieldError::new("payment_method", "choose a payment method")),
        Some(PaymentMethod::MobileMoney) => match form.payment_phone.as_deref() {
            None => errors.push(FieldError::new(
                "payment_phone",
                "mobile money needs a phone number",
            )),
            Some(phone) if !valid_phone(phone) => {
                errors.push(FieldError::new("payment_phone", "enter a valid phone number"));
            }
            Some(_) => {}
        },
        Some(PaymentMethod::CashOnDelivery) => {}
    }

    errors
}

/// Full-form check run before an order may be placed: both prior steps,
/// the terms checkbox, and a non-empty cart.
pub fn validate_review(
    form: &CheckoutForm,
    zones: &[DeliveryZone],
    slots: &[String],
    now: DateTime<Utc>,
    cart_is_empty: bool,
) -> Vec<FieldError> {
    let mut errors = validate_delivery(form, zones, slots, now);
    errors.extend(validate_payment(form));

    if !form.terms_accepted {
        errors.push(FieldError::new("terms_accepted", "accept the terms to continue"));
    }
    if cart_is_empty {
        errors.push(FieldError::new("cart", "your cart is empty"));
    }

    errors
}

fn looks_like_email(raw: &str) -> bool {
    let raw = raw.trim();
    match raw.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// Optional leading `+`, then 9-15 digits; spaces and dashes are ignored.
fn valid_phone(raw: &str) -> bool {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    (9..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones() -> Vec<DeliveryZone> {
        vec![DeliveryZone {
            id: Uuid::new_v4(),
            name: "Westlands".into(),
            fee: 300,
        }]
    }

    fn slots() -> Vec<String> {
        vec!["09:00-12:00".into(), "12:00-15:00".into()]
    }

    fn filled_form(zone: Uuid) -> CheckoutForm {
        CheckoutForm {
            customer_name: Some("Amina K".into()),
            customer_email: Some("amina@example.com".into()),
            street: Some("14 Peponi Road".into()),
            delivery_phone: Some("+254 712 345 678".into()),
            zone_id: Some(zone),
            delivery_date: Some((Utc::now() + Duration::days(3)).date_naive()),
            delivery_slot: Some("09:00-12:00".into()),
            payment_method: Some(PaymentMethod::MobileMoney),
            payment_phone: Some("0712345678".into()),
            terms_accepted: true,
        }
    }

    #[test]
    fn complete_delivery_form_passes() {
        let zones = zones();
        let form = filled_form(zones[0].id);
        let errors = validate_delivery(&form, &zones, &slots(), Utc::now());
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn empty_delivery_form_reports_every_field() {
        let errors =
            validate_delivery(&CheckoutForm::default(), &zones(), &slots(), Utc::now());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        for field in [
            "customer_name",
            "customer_email",
            "street",
            "delivery_phone",
            "zone_id",
            "delivery_date",
            "delivery_slot",
        ] {
            assert!(fields.contains(&field), "missing {field} in {fields:?}");
        }
    }

    #[test]
    fn delivery_date_needs_a_full_day_of_notice() {
        let zones = zones();
        let mut form = filled_form(zones[0].id);
        form.delivery_date = Some(Utc::now().date_naive());
        let errors = validate_delivery(&form, &zones, &slots(), Utc::now());
        assert!(errors.iter().any(|e| e.field == "delivery_date"));
    }

    #[test]
    fn slot_must_come_from_the_published_list() {
        let zones = zones();
        let mut form = filled_form(zones[0].id);
        form.delivery_slot = Some("03:00-04:00".into());
        let errors = validate_delivery(&form, &zones, &slots(), Utc::now());
        assert!(errors.iter().any(|e| e.field == "delivery_slot"));
    }

    #[test]
    fn mobile_money_requires_a_payment_phone() {
        let mut form = CheckoutForm {
            payment_method: Some(PaymentMethod::MobileMoney),
            ..CheckoutForm::default()
        };
        assert!(validate_payment(&form)
            .iter()
            .any(|e| e.field == "payment_phone"));

        form.payment_method = Some(PaymentMethod::CashOnDelivery);
        assert!(validate_payment(&form).is_empty());
    }

    #[test]
    fn review_checks_terms_and_cart() {
        let zones = zones();
        let mut form = filled_form(zones[0].id);
        form.terms_accepted = false;
        let errors = validate_review(&form, &zones, &slots(), Utc::now(), true);
        assert!(errors.iter().any(|e| e.field == "terms_accepted"));
        assert!(errors.iter().any(|e| e.field == "cart"));
    }

    #[test]
    fn phone_validation_accepts_common_shapes() {
        for phone in ["+254712345678", "0712 345 678", "0712-345-678"] {
            assert!(valid_phone(phone), "{phone}");
        }
        for phone in ["12345", "phone", "+2547abc45678", "12345678901234567"] {
            assert!(!valid_phone(phone), "{phone}");
        }
    }
}
