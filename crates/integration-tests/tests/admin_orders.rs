//! Integration tests for the admin orders table.
//!
//! These drive the admin router against a scripted order service and check
//! what the table shows after status changes and refunds.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use bazaar_admin::models::RefundState;
use bazaar_admin::routes;
use bazaar_admin::services::OrderStatusService;
use bazaar_admin::state::AppState;
use bazaar_core::{OrderId, OrderStatus};
use bazaar_integration_tests::{
    FakeOrderService, body_text, form_post, hx_trigger, order, request,
};
use tower::ServiceExt;

const ORDER_A: &str = "abc12345-6789-4def-8000-000000000001";
const ORDER_B: &str = "def67890-1234-4abc-8000-000000000002";

async fn setup(service: FakeOrderService) -> (Router, AppState, Arc<FakeOrderService>) {
    let service = Arc::new(service);
    let state = AppState::seeded(Arc::clone(&service) as Arc<dyn OrderStatusService>).await;
    (routes::app(state.clone()), state, service)
}

fn two_orders() -> FakeOrderService {
    FakeOrderService::new(vec![
        order(ORDER_A, OrderStatus::Processing),
        order(ORDER_B, OrderStatus::Pending),
    ])
}

fn status_of(state: &AppState, id: &str) -> OrderStatus {
    state
        .orders()
        .entry(&OrderId::new(id))
        .unwrap()
        .order
        .order_status
}

fn refund_uri(id: &str) -> String {
    format!("/orders/{id}/refund")
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_renders_one_row_per_order() {
    let (app, _, _) = setup(two_orders()).await;

    let response = app.oneshot(request("GET", "/orders")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert_eq!(html.matches("data-order-row=").count(), 2);
    assert!(html.contains("#abc12345..."));
    assert!(html.contains("Ayesha Khan"));
    assert!(html.contains("Mar 4, 2025"));
    assert!(html.contains("₨1299.00"));
}

#[tokio::test]
async fn test_empty_board_shows_empty_state() {
    let (app, _, _) = setup(FakeOrderService::new(vec![])).await;

    let html = body_text(app.oneshot(request("GET", "/orders")).await.unwrap()).await;
    assert!(html.contains("No Orders Found"));
    assert!(html.contains("There are currently no orders to display."));
    assert_eq!(html.matches("data-order-row=").count(), 0);
}

#[tokio::test]
async fn test_failed_seed_starts_empty() {
    let (app, state, _) = setup(two_orders().failing_list()).await;
    assert!(state.orders().is_empty());

    let html = body_text(app.oneshot(request("GET", "/orders")).await.unwrap()).await;
    assert!(html.contains("No Orders Found"));
}

#[tokio::test]
async fn test_root_redirects_to_orders() {
    let (app, _, _) = setup(two_orders()).await;

    let response = app.oneshot(request("GET", "/")).await.unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers().get("location").unwrap(), "/orders");
}

#[tokio::test]
async fn test_detail_page() {
    let (app, _, _) = setup(two_orders()).await;

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/orders/{ORDER_A}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(ORDER_A));

    let missing = app.oneshot(request("GET", "/orders/nope")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Status selector
// =============================================================================

#[tokio::test]
async fn test_status_change_applies_immediately() {
    let (app, state, service) = setup(two_orders()).await;

    let response = app
        .oneshot(form_post(&format!("/orders/{ORDER_B}/status"), "status=shipped", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("data-status=\"shipped\""));
    assert_eq!(status_of(&state, ORDER_B), OrderStatus::Shipped);
    assert!(service.updates().is_empty());
}

#[tokio::test]
async fn test_status_change_rejects_unknown_values() {
    let (app, state, _) = setup(two_orders()).await;

    let bad_status = app
        .clone()
        .oneshot(form_post(&format!("/orders/{ORDER_B}/status"), "status=lost", None))
        .await
        .unwrap();
    assert_eq!(bad_status.status(), StatusCode::BAD_REQUEST);

    let unknown_order = app
        .oneshot(form_post("/orders/nope/status", "status=shipped", None))
        .await
        .unwrap();
    assert_eq!(unknown_order.status(), StatusCode::NOT_FOUND);
    assert_eq!(status_of(&state, ORDER_B), OrderStatus::Pending);
}

// =============================================================================
// Refund
// =============================================================================

#[tokio::test]
async fn test_refund_success_cancels_order() {
    let (app, state, service) = setup(two_orders()).await;

    let response = app
        .oneshot(request("POST", &refund_uri(ORDER_A)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let trigger = hx_trigger(&response).unwrap();
    assert_eq!(trigger["toast"]["title"], "Order Refunded (Status Updated)");
    assert_eq!(
        trigger["toast"]["description"],
        format!("Order {ORDER_A} status has been changed to 'cancelled'.")
    );
    assert_eq!(trigger["toast"]["variant"], "default");

    let html = body_text(response).await;
    assert!(html.contains("data-status=\"cancelled\""));

    assert_eq!(status_of(&state, ORDER_A), OrderStatus::Cancelled);
    assert_eq!(
        state.orders().refund_state(&OrderId::new(ORDER_A)),
        RefundState::Idle
    );
    assert_eq!(
        service.updates(),
        vec![(OrderId::new(ORDER_A), OrderStatus::Cancelled)]
    );
}

#[tokio::test]
async fn test_refund_failure_leaves_status() {
    let (app, state, service) = setup(two_orders().failing_updates()).await;

    let response = app
        .oneshot(request("POST", &refund_uri(ORDER_A)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let trigger = hx_trigger(&response).unwrap();
    assert_eq!(trigger["toast"]["title"], "Refund Failed");
    assert_eq!(
        trigger["toast"]["description"],
        "Could not update order status to cancelled. Please try again."
    );
    assert_eq!(trigger["toast"]["variant"], "destructive");

    let html = body_text(response).await;
    assert!(html.contains("data-status=\"processing\""));

    assert_eq!(status_of(&state, ORDER_A), OrderStatus::Processing);
    assert_eq!(
        state.orders().refund_state(&OrderId::new(ORDER_A)),
        RefundState::Idle
    );
    assert_eq!(service.updates().len(), 1);
}

#[tokio::test]
async fn test_refund_rejected_for_closed_orders() {
    let closed = FakeOrderService::new(vec![
        order(ORDER_A, OrderStatus::Cancelled),
        order(ORDER_B, OrderStatus::Delivered),
    ]);
    let (app, state, service) = setup(closed).await;

    for id in [ORDER_A, ORDER_B] {
        let response = app
            .clone()
            .oneshot(request("POST", &refund_uri(id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(hx_trigger(&response).unwrap()["toast"]["variant"], "destructive");
    }

    assert_eq!(status_of(&state, ORDER_B), OrderStatus::Delivered);
    assert!(service.updates().is_empty());
}

#[tokio::test]
async fn test_refund_unknown_order() {
    let (app, _, service) = setup(two_orders()).await;

    let response = app.oneshot(request("POST", &refund_uri("nope"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(service.updates().is_empty());
}

#[tokio::test]
async fn test_pending_refund_does_not_block_other_orders() {
    let (service, gate) = two_orders().gated_on(ORDER_A);
    let (app, state, _) = setup(service).await;

    let pending = tokio::spawn(
        app.clone()
            .oneshot(request("POST", &refund_uri(ORDER_A))),
    );
    gate.entered().await;

    // A is in flight: its row shows the spinner and a second refund is refused.
    let a = state.orders().entry(&OrderId::new(ORDER_A)).unwrap();
    assert!(a.is_refunding());
    assert!(!a.can_refund());

    let list = body_text(app.clone().oneshot(request("GET", "/orders")).await.unwrap()).await;
    assert_eq!(list.matches("aria-busy=\"true\"").count(), 1);

    let duplicate = app
        .clone()
        .oneshot(request("POST", &refund_uri(ORDER_A)))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    // B is unaffected and refunds on its own.
    let b = state.orders().entry(&OrderId::new(ORDER_B)).unwrap();
    assert!(b.can_refund());
    let response = app
        .clone()
        .oneshot(request("POST", &refund_uri(ORDER_B)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(status_of(&state, ORDER_B), OrderStatus::Cancelled);
    assert!(state.orders().entry(&OrderId::new(ORDER_A)).unwrap().is_refunding());

    gate.release();
    let response = pending.await.unwrap().unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(status_of(&state, ORDER_A), OrderStatus::Cancelled);
    assert_eq!(
        state.orders().refund_state(&OrderId::new(ORDER_A)),
        RefundState::Idle
    );
}

#[tokio::test]
async fn test_refund_settles_after_client_disconnects() {
    let (service, gate) = two_orders().gated_on(ORDER_A);
    let (app, state, service) = setup(service).await;

    let pending = tokio::spawn(app.oneshot(request("POST", &refund_uri(ORDER_A))));
    gate.entered().await;

    // The client goes away while the order service is still working.
    pending.abort();
    assert!(pending.await.unwrap_err().is_cancelled());
    assert!(state.orders().entry(&OrderId::new(ORDER_A)).unwrap().is_refunding());

    gate.release();
    let id = OrderId::new(ORDER_A);
    tokio::time::timeout(Duration::from_secs(5), async {
        while state.orders().refund_state(&id) != RefundState::Idle {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();

    assert_eq!(status_of(&state, ORDER_A), OrderStatus::Cancelled);
    assert_eq!(service.updates(), vec![(id, OrderStatus::Cancelled)]);
}
