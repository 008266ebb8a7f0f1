//! Integration tests for the storefront cart.
//!
//! A visitor's cart lives behind the session cookie, so each test carries the
//! cookie from the first add through the following requests.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::http::StatusCode;
use bazaar_integration_tests::{
    body_text, form_post, get_with_cookie, hx_trigger, request, session_cookie,
};
use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::routes;
use bazaar_storefront::services::Catalog;
use bazaar_storefront::state::AppState;
use tower::ServiceExt;

const CATALOG: &str = r#"[
    {
        "id": "clay-mug",
        "name": "Clay Mug",
        "price": { "amount": "850.00", "currency_code": "PKR" },
        "available_stock": 3
    },
    {
        "id": "block-print-tee",
        "name": "Block Print Tee",
        "image": "/static/products/tee.jpg",
        "price": { "amount": "1500.00", "currency_code": "PKR" },
        "available_stock": 20,
        "variants": { "Size": ["S", "M", "L"], "Colour": ["Indigo", "Rust"] }
    },
    {
        "id": "sold-out-scarf",
        "name": "Sold Out Scarf",
        "price": { "amount": "990.00" },
        "available_stock": 0
    }
]"#;

fn app() -> Router {
    let config = StorefrontConfig::from_lookup(|key| {
        (key == "STOREFRONT_BASE_URL").then(|| "http://localhost:3000".to_string())
    })
    .unwrap();
    let catalog = Catalog::from_json(CATALOG).unwrap();
    routes::app(AppState::with_catalog(config, catalog))
}

/// Add a product without a session and return the new session cookie.
async fn add_first(app: &Router, form: &str) -> String {
    let response = app
        .clone()
        .oneshot(form_post("/cart/add", form, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response).unwrap()
}

async fn cart_page(app: &Router, cookie: &str) -> String {
    let response = app
        .clone()
        .oneshot(get_with_cookie("/cart", cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}

/// Cart line ids in page order.
fn item_ids(html: &str) -> Vec<String> {
    html.split("data-cart-item=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

async fn update(app: &Router, cookie: &str, item_id: &str, quantity: u32) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(form_post(
            "/cart/update",
            &format!("item_id={item_id}&quantity={quantity}"),
            Some(cookie),
        ))
        .await
        .unwrap();
    (response.status(), body_text(response).await)
}

#[tokio::test]
async fn test_add_sets_session_and_returns_count() {
    let app = app();

    let response = app
        .clone()
        .oneshot(form_post("/cart/add", "product_id=clay-mug&quantity=2", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("HX-Trigger").unwrap(), "cart-updated");

    let cookie = session_cookie(&response).unwrap();
    assert!(cookie.starts_with("bz_session="));
    assert!(body_text(response).await.contains(">2<"));

    let count = app
        .oneshot(get_with_cookie("/cart/count", &cookie))
        .await
        .unwrap();
    assert!(body_text(count).await.contains(">2<"));
}

#[tokio::test]
async fn test_low_stock_card_is_bounded_by_stock() {
    let app = app();
    let cookie = add_first(&app, "product_id=clay-mug").await;

    let html = cart_page(&app, &cookie).await;
    assert!(html.contains("Clay Mug"));
    assert!(html.contains("badge-destructive\">Low Stock<"));
    assert!(html.contains("3 available"));
    assert!(html.contains("max=\"3\""));
    assert!(html.contains("/static/placeholder.svg"));
    assert!(html.contains("href=\"/products/clay-mug\""));
}

#[tokio::test]
async fn test_quantity_changes_recompute_line_total() {
    let app = app();
    let cookie = add_first(&app, "product_id=clay-mug").await;
    let ids = item_ids(&cart_page(&app, &cookie).await);
    let item_id = ids.first().unwrap();

    let (status, html) = update(&app, &cookie, item_id, 2).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("₨1700.00"));

    // Above stock clamps to the stock level.
    let (_, html) = update(&app, &cookie, item_id, 9).await;
    assert!(html.contains("value=\"3\""));
    assert!(html.contains("₨2550.00"));

    // Zero clamps to one.
    let (_, html) = update(&app, &cookie, item_id, 0).await;
    assert!(html.contains("value=\"1\""));
    assert!(html.contains("₨850.00"));

    let page = cart_page(&app, &cookie).await;
    assert!(page.contains("data-subtotal>₨850.00"));
}

#[tokio::test]
async fn test_update_unknown_item_is_not_found() {
    let app = app();
    let cookie = add_first(&app, "product_id=clay-mug").await;

    let (status, _) = update(&app, &cookie, "missing-line", 2).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = app
        .oneshot(form_post("/cart/update", "item_id=x&quantity=1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_returns_empty_fragment_and_toast() {
    let app = app();
    let cookie = add_first(&app, "product_id=clay-mug").await;
    let ids = item_ids(&cart_page(&app, &cookie).await);
    let form = format!("item_id={}", ids.first().unwrap());

    let response = app
        .clone()
        .oneshot(form_post("/cart/remove", &form, Some(cookie.as_str())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let trigger = hx_trigger(&response).unwrap();
    assert_eq!(trigger["toast"]["title"], "Item Removed");
    assert_eq!(
        trigger["toast"]["description"],
        "Clay Mug has been removed from your cart."
    );
    assert!(trigger.as_object().unwrap().contains_key("cart-updated"));
    assert!(body_text(response).await.is_empty());

    assert!(cart_page(&app, &cookie).await.contains("Your cart is empty"));

    // Removing it again still succeeds, without a toast.
    let again = app
        .oneshot(form_post("/cart/remove", &form, Some(cookie.as_str())))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::OK);
    assert_eq!(again.headers().get("HX-Trigger").unwrap(), "cart-updated");
}

#[tokio::test]
async fn test_same_variants_merge_into_one_line() {
    let app = app();
    let form = "product_id=block-print-tee&variants=Size%3AM%2CColour%3AIndigo";
    let cookie = add_first(&app, form).await;

    let response = app
        .clone()
        .oneshot(form_post("/cart/add", form, Some(cookie.as_str())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let other_size = app
        .clone()
        .oneshot(form_post(
            "/cart/add",
            "product_id=block-print-tee&variants=Size%3AL%2CColour%3AIndigo",
            Some(cookie.as_str()),
        ))
        .await
        .unwrap();
    assert_eq!(other_size.status(), StatusCode::OK);

    let html = cart_page(&app, &cookie).await;
    assert_eq!(item_ids(&html).len(), 2);
    assert!(html.contains("Size: M"));
    assert!(html.contains("Colour: Indigo"));
    assert!(html.contains("data-item-count>3<"));
    assert!(html.contains("₨3000.00"));
}

#[tokio::test]
async fn test_add_rejects_bad_requests() {
    let app = app();

    let unknown = app
        .clone()
        .oneshot(form_post("/cart/add", "product_id=nope", None))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let bad_variant = app
        .clone()
        .oneshot(form_post(
            "/cart/add",
            "product_id=block-print-tee&variants=Size%3AXXL%2CColour%3AIndigo",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(bad_variant.status(), StatusCode::BAD_REQUEST);

    let sold_out = app
        .oneshot(form_post("/cart/add", "product_id=sold-out-scarf", None))
        .await
        .unwrap();
    assert_eq!(sold_out.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_empty_cart_without_session() {
    let app = app();

    let response = app.clone().oneshot(request("GET", "/cart")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Your cart is empty"));
    assert!(html.contains("data-item-count>0<"));

    let health = app.oneshot(request("GET", "/health")).await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}
