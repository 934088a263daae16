use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CartLineItem, CustomLoafItem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AddonLine {
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Breakdown {
    pub cream: Option<AddonLine>,
    pub decorations: Vec<AddonLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PriceBreakdown {
    pub base_price: i64,
    pub breakdown: Breakdown,
    pub quantity: u32,
    pub unit_subtotal: i64,
    pub item_total: i64,
}

/// Price breakdown for a configured cake.
///
/// Pure function of the line item: the cart summary, the review step and the
/// order summary all go through here and must agree exactly. A missing cream
/// contributes 0.
pub fn line_item(item: &CartLineItem) -> PriceBreakdown {
    let cream = item.cream.as_ref().map(|c| AddonLine {
        name: c.name.clone(),
        price: c.price,
    });
    let decorations: Vec<AddonLine> = item
        .decorations
        .iter()
        .map(|d| AddonLine {
            name: d.name.clone(),
            price: d.price,
        })
        .collect();

    let unit_subtotal = item.size.price
        + cream.as_ref().map_or(0, |c| c.price)
        + decorations.iter().map(|d| d.price).sum::<i64>();
    let item_total = unit_subtotal * i64::from(item.quantity);

    PriceBreakdown {
        base_price: item.size.price,
        breakdown: Breakdown { cream, decorations },
        quantity: item.quantity,
        unit_subtotal,
        item_total,
    }
}

/// Price breakdown for a custom loaf bundle: one base price plus the cream
/// and topping surcharges of every selection.
pub fn custom_loaf(item: &CustomLoafItem) -> PriceBreakdown {
    let mut addons = Vec::new();
    for selection in &item.selections {
        if let Some(cream) = &selection.cream {
            addons.push(AddonLine {
                name: format!("{} / {}", selection.flavor_name, cream.name),
                price: cream.price,
            });
        }
        if let Some(topping) = &selection.topping {
            addons.push(AddonLine {
                name: format!("{} / {}", selection.flavor_name, topping.name),
                price: topping.price,
            });
        }
    }

    let unit_subtotal = item.base_price + addons.iter().map(|a| a.price).sum::<i64>();
    let item_total = unit_subtotal * i64::from(item.quantity);

    PriceBreakdown {
        base_price: item.base_price,
        breakdown: Breakdown {
            cream: None,
            decorations: addons,
        },
        quantity: item.quantity,
        unit_subtotal,
        item_total,
    }
}
