//! Order detail page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use bazaar_core::OrderId;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

use super::types::OrderRowView;

/// Order detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub current_path: String,
    pub order: OrderRowView,
}

/// Order detail page handler.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<OrderShowTemplate> {
    let id = OrderId::new(id);
    let entry = state
        .orders()
        .entry(&id)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(OrderShowTemplate {
        current_path: "/orders".to_string(),
        order: OrderRowView::from(&entry),
    })
}
