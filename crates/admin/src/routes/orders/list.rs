//! Orders list page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::state::AppState;

use super::types::OrderRowView;

/// Orders list page template.
///
/// Renders the empty-state card instead of the table when `rows` is empty.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub current_path: String,
    pub rows: Vec<OrderRowView>,
}

/// Orders list page handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> OrdersIndexTemplate {
    let rows = state
        .orders()
        .entries()
        .iter()
        .map(OrderRowView::from)
        .collect();

    OrdersIndexTemplate {
        current_path: "/orders".to_string(),
        rows,
    }
}
