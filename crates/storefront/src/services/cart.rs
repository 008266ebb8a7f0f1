//! Shared cart store.
//!
//! Carts live in a `moka` cache keyed by the cart id kept in the visitor's
//! session, and are evicted after sitting idle. Each cart is a list of lines
//! behind its own async mutex, so concurrent requests for one cart apply in
//! order while different carts never contend.

use std::collections::BTreeMap;
use std::sync::Arc;

use bazaar_core::{CartId, CartItem, CartItemId, ProductId};
use moka::future::Cache;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::CartStoreConfig;

/// Errors from cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("cart item not found: {0}")]
    ItemNotFound(CartItemId),

    #[error("product is out of stock: {0}")]
    OutOfStock(ProductId),
}

type CartLines = Arc<Mutex<Vec<CartItem>>>;

/// In-memory carts shared by every request handler.
///
/// Cheaply cloneable; clones share the same carts.
#[derive(Clone)]
pub struct CartStore {
    carts: Cache<CartId, CartLines>,
}

impl CartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(config: &CartStoreConfig) -> Self {
        let carts = Cache::builder()
            .max_capacity(config.max_carts)
            .time_to_idle(config.idle_timeout)
            .build();

        Self { carts }
    }

    /// Lines of an existing cart, creating nothing.
    async fn existing(&self, cart: &CartId) -> Option<CartLines> {
        self.carts.get(cart).await
    }

    /// Lines of a cart, creating an empty one on first use.
    async fn lines(&self, cart: &CartId) -> CartLines {
        self.carts
            .get_with(cart.clone(), async { Arc::new(Mutex::new(Vec::new())) })
            .await
    }

    /// All lines in the cart, in the order they were added.
    pub async fn items(&self, cart: &CartId) -> Vec<CartItem> {
        match self.existing(cart).await {
            Some(lines) => lines.lock().await.clone(),
            None => Vec::new(),
        }
    }

    /// One line of the cart.
    pub async fn item(&self, cart: &CartId, item: &CartItemId) -> Option<CartItem> {
        let lines = self.existing(cart).await?;
        let lines = lines.lock().await;
        lines.iter().find(|line| &line.id == item).cloned()
    }

    /// Total number of units in the cart.
    pub async fn count(&self, cart: &CartId) -> u32 {
        self.items(cart)
            .await
            .iter()
            .fold(0_u32, |total, line| total.saturating_add(line.quantity))
    }

    /// Add a line to the cart.
    ///
    /// A line for the same product with the same variants absorbs the new
    /// quantity instead of being duplicated. The resulting quantity is held
    /// to `[1, available_stock]`; the stock figure on the new line wins.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfStock` if the product has no stock.
    pub async fn add_item(&self, cart: &CartId, new_line: CartItem) -> Result<CartItem, CartError> {
        if new_line.available_stock == 0 {
            return Err(CartError::OutOfStock(new_line.product_id));
        }

        let lines = self.lines(cart).await;
        let mut lines = lines.lock().await;
        let stock = new_line.available_stock;

        if let Some(existing) = find_selection(
            &mut lines,
            &new_line.product_id,
            &new_line.selected_variants,
        ) {
            existing.available_stock = stock;
            existing.quantity = existing
                .quantity
                .saturating_add(new_line.quantity)
                .clamp(1, stock);
            return Ok(existing.clone());
        }

        let line = CartItem {
            quantity: new_line.quantity.clamp(1, stock),
            ..new_line
        };
        lines.push(line.clone());
        Ok(line)
    }

    /// Set the quantity of a line.
    ///
    /// The value is stored as given; bounding it is the quantity control's
    /// job.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the cart has no such line.
    pub async fn update_quantity(
        &self,
        cart: &CartId,
        item: &CartItemId,
        quantity: u32,
    ) -> Result<CartItem, CartError> {
        let not_found = || CartError::ItemNotFound(item.clone());
        let lines = self.existing(cart).await.ok_or_else(not_found)?;
        let mut lines = lines.lock().await;

        let line = lines
            .iter_mut()
            .find(|line| &line.id == item)
            .ok_or_else(not_found)?;
        line.quantity = quantity;
        Ok(line.clone())
    }

    /// Remove a line, returning it if it was present.
    ///
    /// Removing a line that is already gone is not an error.
    pub async fn remove(&self, cart: &CartId, item: &CartItemId) -> Option<CartItem> {
        let lines = self.existing(cart).await?;
        let mut lines = lines.lock().await;

        let index = lines.iter().position(|line| &line.id == item)?;
        Some(lines.remove(index))
    }
}

fn find_selection<'a>(
    lines: &'a mut [CartItem],
    product_id: &ProductId,
    variants: &BTreeMap<String, String>,
) -> Option<&'a mut CartItem> {
    lines
        .iter_mut()
        .find(|line| line.same_selection(product_id, variants))
}
