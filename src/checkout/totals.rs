use crate::models::{CartLineItem, CustomLoafItem, OrderTotals, PaymentSplit};

use super::pricing;

/// Aggregate cart-level totals from the item collections.
///
/// `total = max(0, subtotal - discount) + delivery_fee`; the discount can
/// never drive the goods value negative.
pub fn order_totals(
    items: &[CartLineItem],
    custom_loaves: &[CustomLoafItem],
    delivery_fee: Option<i64>,
    discount: i64,
) -> OrderTotals {
    let line_subtotal: i64 = items.iter().map(|i| pricing::line_item(i).item_total).sum();
    let custom_loaf_subtotal: i64 = custom_loaves
        .iter()
        .map(|l| pricing::custom_loaf(l).item_total)
        .sum();
    let subtotal = line_subtotal + custom_loaf_subtotal;

    let items_count = items.iter().map(|i| i.quantity).sum::<u32>()
        + custom_loaves.iter().map(|l| l.quantity).sum::<u32>();
    let custom_loaf_count = custom_loaves.iter().map(|l| l.quantity).sum();

    let total = (subtotal - discount).max(0) + delivery_fee.unwrap_or(0);

    OrderTotals {
        subtotal,
        custom_loaf_subtotal,
        custom_loaf_count,
        items_count,
        discount,
        delivery_fee,
        total,
    }
}

/// 50%-now / 50%-on-dispatch split. The deposit rounds half up, the balance
/// is whatever remains, so the two always sum back to the total.
pub fn split_payment(total: i64) -> PaymentSplit {
    let paid_now = (total + 1) / 2;
    PaymentSplit {
        paid_now,
        remaining: total - paid_now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CakeSize, CartLineItem, CreamPick, DecorationPick};
    use uuid::Uuid;

    fn scenario_item() -> CartLineItem {
        CartLineItem {
            id: Uuid::new_v4(),
            cake_id: Uuid::new_v4(),
            cake_name: "Vanilla Celebration".into(),
            size: CakeSize {
                label: "8-inch".into(),
                price: 1500,
            },
            cream: Some(CreamPick {
                id: Uuid::new_v4(),
                name: "Whipped vanilla".into(),
                price: 50,
            }),
            decorations: vec![
                DecorationPick {
                    id: Uuid::new_v4(),
                    name: "Sugar flowers".into(),
                    price: 80,
                },
                DecorationPick {
                    id: Uuid::new_v4(),
                    name: "Gold leaf".into(),
                    price: 40,
                },
            ],
            quantity: 2,
            notes: None,
            reference_images: Vec::new(),
            item_total: 0,
        }
    }

    #[test]
    fn totals_apply_discount_then_delivery_fee() {
        let items = [scenario_item()];
        let totals = order_totals(&items, &[], Some(300), 200);
        assert_eq!(totals.subtotal, 3340);
        assert_eq!(totals.total, 3440);
        assert_eq!(totals.items_count, 2);
    }

    #[test]
    fn discount_never_drives_total_negative() {
        let items = [scenario_item()];
        let totals = order_totals(&items, &[], Some(300), 10_000);
        assert_eq!(totals.total, 300);
    }

    #[test]
    fn missing_delivery_fee_counts_as_zero() {
        let items = [scenario_item()];
        let totals = order_totals(&items, &[], None, 0);
        assert_eq!(totals.delivery_fee, None);
        assert_eq!(totals.total, 3340);
    }

    #[test]
    fn split_halves_reassemble_for_even_totals() {
        let split = split_payment(3440);
        assert_eq!(split.paid_now, 1720);
        assert_eq!(split.remaining, 1720);
    }

    #[test]
    fn split_halves_reassemble_for_odd_totals() {
        for total in [1, 3, 999, 3341] {
            let split = split_payment(total);
            assert_eq!(split.paid_now + split.remaining, total, "total {total}");
            assert_eq!(split.paid_now - split.remaining, 1, "total {total}");
        }
    }
}
