//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Cart IDs are stored in the session and map to carts in the shared
//! [`CartStore`](crate::services::CartStore).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use bazaar_core::{CartId, CartItem, CartItemId, CurrencyCode, Price, ProductId, Toast};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use crate::components::QuantityControl;
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::services::CartError;
use crate::state::AppState;

/// Image shown for lines without a product image.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

/// Event fired after every cart mutation so badges and totals refresh.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart item card display data for templates.
#[derive(Clone)]
pub struct CartItemCardView {
    pub id: String,
    pub name: String,
    pub product_href: String,
    pub image_url: String,
    /// `Type: Value` labels, one per selected variant.
    pub variants: Vec<String>,
    pub unit_price: String,
    pub line_total: String,
    pub stock_label: String,
    pub low_stock: bool,
    pub quantity: QuantityControl,
}

impl From<&CartItem> for CartItemCardView {
    fn from(item: &CartItem) -> Self {
        let stock_label = if item.is_in_stock() {
            format!("{} available", item.available_stock)
        } else {
            "Out of stock".to_string()
        };

        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            product_href: format!("/products/{}", urlencoding::encode(item.product_id.as_str())),
            image_url: item
                .image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            variants: item
                .selected_variants
                .iter()
                .map(|(kind, value)| format!("{kind}: {value}"))
                .collect(),
            unit_price: item.price.to_string(),
            line_total: item.line_total().to_string(),
            stock_label,
            low_stock: item.is_low_stock(),
            quantity: QuantityControl::for_stock(item.quantity, item.available_stock),
        }
    }
}

/// Cart totals display data for templates.
#[derive(Clone)]
pub struct CartSummaryView {
    pub subtotal: String,
    pub item_count: u32,
}

impl CartSummaryView {
    fn from_items(items: &[CartItem]) -> Self {
        let subtotal = items
            .iter()
            .try_fold(Price::zero(default_currency(items)), |total, item| {
                total.checked_add(&item.line_total())
            })
            .map_or_else(
                || {
                    tracing::warn!("Cart mixes currencies, subtotal unavailable");
                    "n/a".to_string()
                },
                |total| total.to_string(),
            );

        Self {
            subtotal,
            item_count: item_count(items),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemCardView>,
    pub summary: CartSummaryView,
}

impl From<&[CartItem]> for CartView {
    fn from(items: &[CartItem]) -> Self {
        Self {
            items: items.iter().map(CartItemCardView::from).collect(),
            summary: CartSummaryView::from_items(items),
        }
    }
}

fn default_currency(items: &[CartItem]) -> CurrencyCode {
    items
        .first()
        .map(|item| item.price.currency_code)
        .unwrap_or_default()
}

fn item_count(items: &[CartItem]) -> u32 {
    items
        .iter()
        .fold(0_u32, |total, item| total.saturating_add(item.quantity))
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart ID from the session.
async fn get_cart_id(session: &Session) -> Option<CartId> {
    session
        .get::<CartId>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Get the cart ID from the session, assigning a new one on first use.
async fn get_or_create_cart_id(session: &Session) -> Result<CartId> {
    if let Some(cart_id) = get_cart_id(session).await {
        return Ok(cart_id);
    }

    let cart_id = CartId::new(Uuid::new_v4().to_string());
    session.insert(session_keys::CART_ID, &cart_id).await?;
    tracing::debug!(cart_id = %cart_id, "Created cart");
    Ok(cart_id)
}

async fn cart_items(state: &AppState, session: &Session) -> Vec<CartItem> {
    match get_cart_id(session).await {
        Some(cart_id) => state.carts().items(&cart_id).await,
        None => Vec::new(),
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
    /// Selected variants as `Type:Value,Type:Value`.
    #[serde(default)]
    pub variants: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Single cart item card fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_item.html")]
pub struct CartItemTemplate {
    pub item: CartItemCardView,
}

/// Cart totals fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_summary.html")]
pub struct CartSummaryTemplate {
    pub summary: CartSummaryView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> CartShowTemplate {
    let items = cart_items(&state, &session).await;
    CartShowTemplate {
        cart: CartView::from(items.as_slice()),
    }
}

/// Add item to cart (HTMX).
///
/// Creates the session's cart on first use. A line with the same product and
/// variants absorbs the quantity. Returns the count badge and fires
/// `cart-updated`.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state.catalog().product(&ProductId::new(form.product_id))?;
    let variants = product.parse_variants(&form.variants)?;

    let cart_id = get_or_create_cart_id(&session).await?;
    let line = product.cart_line(
        CartItemId::new(Uuid::new_v4().to_string()),
        form.quantity.unwrap_or(1),
        variants,
    );
    let line = state.carts().add_item(&cart_id, line).await?;
    tracing::info!(cart_id = %cart_id, item_id = %line.id, quantity = line.quantity, "Added to cart");

    let count = state.carts().count(&cart_id).await;
    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Update cart item quantity (HTMX).
///
/// The requested quantity is clamped to `[1, available stock]` by the
/// line's quantity control before it reaches the store. Returns the
/// re-rendered card.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let item_id = CartItemId::new(form.item_id);
    let cart_id = get_cart_id(&session)
        .await
        .ok_or_else(|| CartError::ItemNotFound(item_id.clone()))?;

    let current = state
        .carts()
        .item(&cart_id, &item_id)
        .await
        .ok_or_else(|| CartError::ItemNotFound(item_id.clone()))?;
    let quantity =
        QuantityControl::for_stock(current.quantity, current.available_stock).clamp(form.quantity);

    let updated = state
        .carts()
        .update_quantity(&cart_id, &item_id, quantity)
        .await?;

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartItemTemplate {
            item: CartItemCardView::from(&updated),
        },
    )
        .into_response())
}

/// Remove item from cart (HTMX).
///
/// Returns an empty body so the card swaps out, plus a toast naming the
/// removed item. Removing a line that is already gone succeeds quietly.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let item_id = CartItemId::new(form.item_id);
    let removed = match get_cart_id(&session).await {
        Some(cart_id) => state.carts().remove(&cart_id, &item_id).await,
        None => None,
    };

    let Some(removed) = removed else {
        tracing::debug!(item_id = %item_id, "Remove for missing cart item");
        return Ok((
            AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
            Html(""),
        )
            .into_response());
    };

    tracing::info!(item_id = %item_id, "Removed from cart");
    let trigger = Toast::new(
        "Item Removed",
        format!("{} has been removed from your cart.", removed.name),
    )
    .hx_trigger_with_events(&[CART_UPDATED_EVENT])
    .map_err(|e| AppError::Internal(format!("toast serialization failed: {e}")))?;

    Ok((AppendHeaders([("HX-Trigger", trigger)]), Html("")).into_response())
}

/// Get cart totals (HTMX).
#[instrument(skip(state, session))]
pub async fn summary(State(state): State<AppState>, session: Session) -> CartSummaryTemplate {
    let items = cart_items(&state, &session).await;
    CartSummaryTemplate {
        summary: CartSummaryView::from_items(&items),
    }
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> CartCountTemplate {
    let count = match get_cart_id(&session).await {
        Some(cart_id) => state.carts().count(&cart_id).await,
        None => 0,
    };

    CartCountTemplate { count }
}
