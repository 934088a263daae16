use uuid::Uuid;

use crate::models::{CartLineItem, CustomLoafItem, DeliveryZone, OrderTotals, Promotion};

use super::{pricing, totals};

/// A shopper's cart. Owns its item collections exclusively until order
/// submission hands a deep copy to the order record.
///
/// Every mutating operation recomputes the derived totals before it
/// returns, so `totals()` is never stale relative to the items.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<CartLineItem>,
    custom_loaves: Vec<CustomLoafItem>,
    delivery_zone: Option<DeliveryZone>,
    promotion: Option<Promotion>,
    totals: OrderTotals,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        let mut cart = Self {
            items: Vec::new(),
            custom_loaves: Vec::new(),
            delivery_zone: None,
            promotion: None,
            totals: totals::order_totals(&[], &[], None, 0),
        };
        cart.recompute();
        cart
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn custom_loaves(&self) -> &[CustomLoafItem] {
        &self.custom_loaves
    }

    pub fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    pub fn delivery_zone(&self) -> Option<&DeliveryZone> {
        self.delivery_zone.as_ref()
    }

    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.custom_loaves.is_empty()
    }

    pub fn add_item(&mut self, item: CartLineItem) -> Uuid {
        let id = item.id;
        self.items.push(item);
        self.recompute();
        id
    }

    pub fn remove_item(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.recompute();
        }
        removed
    }

    /// A quantity of zero or less removes the item.
    pub fn update_quantity(&mut self, id: Uuid, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.recompute();
        true
    }

    pub fn add_custom_loaf(&mut self, loaf: CustomLoafItem) -> Uuid {
        let id = loaf.id;
        self.custom_loaves.push(loaf);
        self.recompute();
        id
    }

    pub fn remove_custom_loaf(&mut self, id: Uuid) -> bool {
        let before = self.custom_loaves.len();
        self.custom_loaves.retain(|loaf| loaf.id != id);
        let removed = self.custom_loaves.len() != before;
        if removed {
            self.recompute();
        }
        removed
    }

    pub fn apply_promotion(&mut self, promotion: Promotion) {
        self.promotion = Some(promotion);
        self.recompute();
    }

    pub fn set_delivery_zone(&mut self, zone: DeliveryZone) {
        self.delivery_zone = Some(zone);
        self.recompute();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.custom_loaves.clear();
        self.delivery_zone = None;
        self.promotion = None;
        self.recompute();
    }

    fn recompute(&mut self) {
        for item in &mut self.items {
            let total = pricing::line_item(item).item_total;
            item.item_total = total;
        }
        for loaf in &mut self.custom_loaves {
            let total = pricing::custom_loaf(loaf).item_total;
            loaf.item_total = total;
        }

        let discount = self.promotion.as_ref().map_or(0, |p| p.discount);
        self.totals = totals::order_totals(
            &self.items,
            &self.custom_loaves,
            self.delivery_zone.as_ref().map(|z| z.fee),
            discount,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CakeSize, CreamPick};

    fn item(base: i64, cream: Option<i64>, quantity: u32) -> CartLineItem {
        CartLineItem {
            id: Uuid::new_v4(),
            cake_id: Uuid::new_v4(),
            cake_name: "Red Velvet".into(),
            size: CakeSize {
                label: "6-inch".into(),
                price: base,
            },
            cream: cream.map(|price| CreamPick {
                id: Uuid::new_v4(),
                name: "Cream cheese".into(),
                price,
            }),
            decorations: Vec::new(),
            quantity,
            notes: None,
            reference_images: Vec::new(),
            item_total: 0,
        }
    }

    fn zone(fee: i64) -> DeliveryZone {
        DeliveryZone {
            id: Uuid::new_v4(),
            name: "Kilimani".into(),
            fee,
        }
    }

    #[test]
    fn totals_follow_every_mutation() {
        let mut cart = Cart::new();
        assert_eq!(cart.totals().total, 0);

        let id = cart.add_item(item(1000, Some(100), 2));
        assert_eq!(cart.totals().subtotal, 2200);
        assert_eq!(cart.totals().items_count, 2);

        cart.update_quantity(id, 3);
        assert_eq!(cart.totals().subtotal, 3300);

        cart.set_delivery_zone(zone(250));
        assert_eq!(cart.totals().delivery_fee, Some(250));
        assert_eq!(cart.totals().total, 3550);

        cart.remove_item(id);
        assert_eq!(cart.totals().subtotal, 0);
        assert_eq!(cart.totals().total, 250);
    }

    #[test]
    fn zero_quantity_update_removes_the_item() {
        let mut cart = Cart::new();
        let id = cart.add_item(item(500, None, 1));
        assert!(cart.update_quantity(id, 0));
        assert!(cart.is_empty());
        assert_eq!(cart.totals().items_count, 0);
    }

    #[test]
    fn line_item_totals_stay_in_sync() {
        let mut cart = Cart::new();
        let id = cart.add_item(item(800, Some(50), 1));
        cart.update_quantity(id, 4);
        let stored = &cart.items()[0];
        assert_eq!(stored.item_total, 3400);
        assert_eq!(
            stored.item_total,
            pricing::line_item(stored).item_total
        );
    }

    #[test]
    fn promotion_discount_is_clamped_by_totals() {
        let mut cart = Cart::new();
        cart.add_item(item(400, None, 1));
        cart.apply_promotion(Promotion {
            id: Uuid::new_v4(),
            code: "WELCOME".into(),
            discount: 1_000,
            active: true,
        });
        assert_eq!(cart.totals().total, 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_item(item(700, None, 2));
        cart.set_delivery_zone(zone(300));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.totals().total, 0);
        assert!(cart.delivery_zone().is_none());
    }
}
