//! Shopping cart line item.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CartItemId, Price, ProductId};

/// Stock level below which a cart line is flagged as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A single line in a shopping cart.
///
/// The line total is always derived from `price` and `quantity`; it is
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    /// Image URL. `None` renders the placeholder.
    pub image: Option<String>,
    /// Unit price.
    pub price: Price,
    pub quantity: u32,
    pub available_stock: u32,
    /// Selected variant values keyed by variant type (e.g. `Size -> M`).
    #[serde(default)]
    pub selected_variants: BTreeMap<String, String>,
}

impl CartItem {
    /// Unit price multiplied by the current quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.available_stock < LOW_STOCK_THRESHOLD
    }

    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.available_stock > 0
    }

    /// Whether this line holds the same product with the same variants.
    #[must_use]
    pub fn same_selection(&self, product_id: &ProductId, variants: &BTreeMap<String, String>) -> bool {
        &self.product_id == product_id && &self.selected_variants == variants
    }
}
