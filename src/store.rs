use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    checkout::{cart::Cart, form::CheckoutForm, steps::CheckoutProgress},
    models::{
        Cake, Cream, Decoration, DeliveryZone, Flavor, Order, OrderStatus, Promotion,
        StaffUser, Topping,
    },
};

/// The custom loaf bundle: several flavor selections under one base price.
#[derive(Debug, Clone)]
pub struct CustomLoafConfig {
    pub base_price: i64,
    pub max_selections: usize,
}

/// Read-only reference data seeded from fixtures at startup. Every lookup
/// the checkout needs goes through here.
#[derive(Debug)]
pub struct CatalogStore {
    pub cakes: Vec<Cake>,
    pub creams: Vec<Cream>,
    pub decorations: Vec<Decoration>,
    pub flavors: Vec<Flavor>,
    pub toppings: Vec<Topping>,
    pub zones: Vec<DeliveryZone>,
    pub slots: Vec<String>,
    pub promotions: Vec<Promotion>,
    pub staff: Vec<StaffUser>,
    pub loaf: CustomLoafConfig,
}

impl CatalogStore {
    pub fn cake(&self, id: Uuid) -> Option<&Cake> {
        self.cakes.iter().find(|c| c.id == id)
    }

    pub fn cream(&self, id: Uuid) -> Option<&Cream> {
        self.creams.iter().find(|c| c.id == id)
    }

    pub fn decoration(&self, id: Uuid) -> Option<&Decoration> {
        self.decorations.iter().find(|d| d.id == id)
    }

    pub fn flavor(&self, id: Uuid) -> Option<&Flavor> {
        self.flavors.iter().find(|f| f.id == id)
    }

    pub fn topping(&self, id: Uuid) -> Option<&Topping> {
        self.toppings.iter().find(|t| t.id == id)
    }

    pub fn zone(&self, id: Uuid) -> Option<&DeliveryZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Active promotions only; codes match case-insensitively.
    pub fn promotion_by_code(&self, code: &str) -> Option<&Promotion> {
        self.promotions
            .iter()
            .find(|p| p.active && p.code.eq_ignore_ascii_case(code.trim()))
    }

    pub fn staff_by_email(&self, email: &str) -> Option<&StaffUser> {
        self.staff.iter().find(|s| s.email == email)
    }
}

/// Per-shopper checkout state: the cart, the accumulating form, the wizard
/// progress, and the duplicate-submission guard.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub cart: Cart,
    pub form: CheckoutForm,
    pub progress: CheckoutProgress,
    pub submitting: bool,
    pub created_at: DateTime<Utc>,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self {
            cart: Cart::new(),
            form: CheckoutForm::default(),
            progress: CheckoutProgress::default(),
            submitting: false,
            created_at: Utc::now(),
        }
    }
}

/// Session-scoped state, keyed by the shopper's `x-session-id`. Stands in
/// for the browser's local/session storage; mutations run to completion
/// under the lock, mirroring the source's single-threaded store.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<Uuid, CheckoutSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the session, creating it on first touch.
    pub fn with<R>(&self, session_id: Uuid, f: impl FnOnce(&mut CheckoutSession) -> R) -> R {
        let mut sessions = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let session = sessions.entry(session_id).or_default();
        f(session)
    }
}

/// Order history. No durable backing; orders live for the process lifetime.
#[derive(Debug, Default)]
pub struct OrderStore {
    inner: RwLock<HashMap<Uuid, Order>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, order: Order) {
        let mut orders = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        orders.insert(order.id, order);
    }

    pub fn get(&self, id: Uuid) -> Option<Order> {
        let orders = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        orders.get(&id).cloned()
    }

    pub fn list_for_session(
        &self,
        session_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> (Vec<Order>, i64) {
        let orders = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut matches: Vec<Order> = orders
            .values()
            .filter(|o| o.session_id == session_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = matches.len() as i64;
        (page_slice(matches, limit, offset), total)
    }

    pub fn list(
        &self,
        status: Option<OrderStatus>,
        newest_first: bool,
        limit: i64,
        offset: i64,
    ) -> (Vec<Order>, i64) {
        let orders = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut matches: Vec<Order> = orders
            .values()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        if newest_first {
            matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        } else {
            matches.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        }
        let total = matches.len() as i64;
        (page_slice(matches, limit, offset), total)
    }

    pub fn update_status(&self, id: Uuid, status: OrderStatus) -> Option<Order> {
        let mut orders = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let order = orders.get_mut(&id)?;
        order.status = status;
        order.updated_at = Utc::now();
        Some(order.clone())
    }
}

fn page_slice(orders: Vec<Order>, limit: i64, offset: i64) -> Vec<Order> {
    orders
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}
