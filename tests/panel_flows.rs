//! End-to-end flows against the stub API

mod common;

use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::{Arc, Mutex};

use vendor_panel::api::{ApiError, CategoryForm};
use vendor_panel::auth::{LoginWizard, Step};
use vendor_panel::guard::{Navigation, PlanGuard};
use vendor_panel::models::{AccountType, BankAccount, ItemStatus, RecommendedItem};
use vendor_panel::session::{keys, KvStore, SessionManager};

fn auth_routes() -> Router {
    Router::new()
        .route(
            "/vendor/login",
            post(|| async { Json(json!({ "success": true, "vendorId": "v1", "otp": 4821 })) }),
        )
        .route(
            "/vendor/verify-otp",
            post(|Json(body): Json<Value>| async move {
                if body["otp"] == "4821" && body["vendorId"] == "v1" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "success": true,
                            "token": "t0k3n",
                            "vendor": {
                                "_id": "v1",
                                "restaurantName": "Spice Hub",
                                "email": "owner@spicehub.in",
                                "mobile": "9876543210",
                                "location": "Pune"
                            }
                        })),
                    )
                } else {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "success": false, "message": "Invalid OTP" })),
                    )
                }
            }),
        )
}

#[tokio::test]
async fn test_login_and_verify_writes_session() {
    let stub = common::serve(auth_routes()).await;
    let mut session = SessionManager::load(KvStore::open_in_memory().unwrap()).unwrap();
    let mut wizard = LoginWizard::new();

    wizard
        .submit_login(&stub.client, "owner@spicehub.in", "secret1")
        .await
        .unwrap();
    assert_eq!(wizard.vendor_id(), Some("v1"));
    let code = wizard.autofill().unwrap().to_string();
    assert_eq!(code, "4821");

    wizard.set_code(&code);
    wizard.submit_otp(&stub.client, &mut session).await.unwrap();
    assert!(matches!(wizard.step(), Step::Success { .. }));
    assert_eq!(stub.hits(), 2);

    let current = session.current().unwrap();
    assert_eq!(current.vendor_id, "v1");
    assert_eq!(session.token().as_deref(), Some("t0k3n"));
    assert_eq!(
        session.store().get(keys::RESTAURANT_NAME).unwrap().as_deref(),
        Some("Spice Hub")
    );

    for _ in 0..59 {
        wizard.tick();
    }
    assert_eq!(wizard.redirect(), None);
    wizard.tick();
    assert_eq!(wizard.redirect(), Some("/dashboard"));
}

#[tokio::test]
async fn test_wrong_otp_keeps_verify_step() {
    let stub = common::serve(auth_routes()).await;
    let mut session = SessionManager::load(KvStore::open_in_memory().unwrap()).unwrap();
    let mut wizard = LoginWizard::new();

    wizard
        .submit_login(&stub.client, "owner@spicehub.in", "secret1")
        .await
        .unwrap();
    wizard.set_code("0000");
    let err = wizard.submit_otp(&stub.client, &mut session).await.unwrap_err();

    assert!(err.to_string().contains("Invalid OTP"));
    assert!(matches!(wizard.step(), Step::VerifyOtp { .. }));
    assert_eq!(wizard.error(), Some("Invalid OTP"));
    assert!(session.current().is_none());
}

#[tokio::test]
async fn test_short_otp_sends_no_request() {
    let stub = common::serve(auth_routes()).await;
    let mut session = SessionManager::load(KvStore::open_in_memory().unwrap()).unwrap();
    let mut wizard = LoginWizard::new();

    wizard
        .submit_login(&stub.client, "owner@spicehub.in", "secret1")
        .await
        .unwrap();
    assert_eq!(stub.hits(), 1);

    for code in ["12", "12345", "12a4"] {
        wizard.set_code(code);
        assert!(wizard.submit_otp(&stub.client, &mut session).await.is_err());
    }
    assert_eq!(stub.hits(), 1);
    assert!(session.current().is_none());
}

#[tokio::test]
async fn test_resend_waits_for_countdown_then_resets_it() {
    let routes = auth_routes().route(
        "/vendor/resend-otp",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["vendorId"], "v1");
            Json(json!({ "success": true, "otp": "0917", "message": "OTP resent" }))
        }),
    );
    let stub = common::serve(routes).await;
    let mut wizard = LoginWizard::new();

    wizard
        .submit_login(&stub.client, "owner@spicehub.in", "secret1")
        .await
        .unwrap();
    wizard.set_code("12");
    assert_eq!(stub.hits(), 1);

    assert!(!wizard.can_resend());
    let err = wizard.resend(&stub.client).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(stub.hits(), 1);

    for _ in 0..300 {
        wizard.tick();
    }
    assert!(wizard.can_resend());
    wizard.resend(&stub.client).await.unwrap();
    assert_eq!(stub.hits(), 2);

    match wizard.step() {
        Step::VerifyOtp {
            code,
            resend,
            autofill,
            ..
        } => {
            assert!(code.is_empty());
            assert_eq!(resend.remaining(), 300);
            assert_eq!(autofill.as_deref(), Some("0917"));
        }
        other => panic!("expected OTP entry, got {:?}", other),
    }
    assert!(!wizard.can_resend());
    assert_eq!(wizard.autofill(), Some("0917"));
}

#[tokio::test]
async fn test_invalid_credentials_send_no_request() {
    let stub = common::serve(auth_routes()).await;
    let mut wizard = LoginWizard::new();

    let err = wizard
        .submit_login(&stub.client, "not-an-email", "secret1")
        .await
        .unwrap_err();
    assert!(err.is_validation());
    let err = wizard
        .submit_login(&stub.client, "owner@spicehub.in", "123")
        .await
        .unwrap_err();
    assert!(err.is_validation());

    assert_eq!(stub.hits(), 0);
    assert_eq!(wizard.step(), &Step::Login);
}

#[tokio::test]
async fn test_category_without_image_sends_no_request() {
    let stub = common::serve(Router::new()).await;
    let form = CategoryForm {
        vendor_id: "v1".to_string(),
        name: "Starters".to_string(),
        image: None,
    };

    let err = stub.client.create_category(&form).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(stub.hits(), 0);
}

#[tokio::test]
async fn test_category_create_sends_multipart() {
    let fields = Arc::new(Mutex::new(Vec::<String>::new()));
    let seen = fields.clone();
    let routes = Router::new().route(
        "/restaurant/category",
        post(move |mut multipart: Multipart| {
            let seen = seen.clone();
            async move {
                while let Ok(Some(field)) = multipart.next_field().await {
                    let name = field.name().unwrap_or_default().to_string();
                    seen.lock().unwrap().push(name);
                }
                Json(json!({ "success": true, "message": "Category created" }))
            }
        }),
    );
    let stub = common::serve(routes).await;

    let mut image = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    image.write_all(b"\x89PNG\r\n\x1a\n").unwrap();
    let form = CategoryForm {
        vendor_id: "v1".to_string(),
        name: "Starters".to_string(),
        image: Some(image.path().to_path_buf()),
    };

    let message = stub.client.create_category(&form).await.unwrap();
    assert_eq!(message, "Category created");

    let fields = fields.lock().unwrap();
    assert!(fields.contains(&"categoryName".to_string()));
    assert!(fields.contains(&"vendorId".to_string()));
    assert!(fields.contains(&"image".to_string()));
}

#[tokio::test]
async fn test_product_toggle_reverts_on_failure() {
    let routes = Router::new().route(
        "/restaurant-products/{pid}/recommended/{iid}/status",
        put(|Path((_pid, _iid)): Path<(String, String)>| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Database unavailable" })),
            )
        }),
    );
    let stub = common::serve(routes).await;

    let mut item = RecommendedItem {
        id: "i1".to_string(),
        name: "Paneer Tikka".to_string(),
        status: ItemStatus::Active,
        ..Default::default()
    };
    let mut seen = vec![];
    let err = stub
        .client
        .toggle_item_status("p1", &mut item, |s| seen.push(*s))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Rejected { status: Some(500), .. }));
    assert_eq!(item.status, ItemStatus::Active);
    assert_eq!(seen, vec![ItemStatus::Inactive, ItemStatus::Active]);
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn test_product_toggle_keeps_new_status() {
    let routes = Router::new().route(
        "/restaurant-products/{pid}/recommended/{iid}/status",
        put(|Json(body): Json<Value>| async move {
            Json(json!({ "success": true, "message": format!("Status set to {}", body["status"]) }))
        }),
    );
    let stub = common::serve(routes).await;

    let mut item = RecommendedItem {
        id: "i1".to_string(),
        status: ItemStatus::Inactive,
        ..Default::default()
    };
    let status = stub
        .client
        .toggle_item_status("p1", &mut item, |_| {})
        .await
        .unwrap();
    assert_eq!(status, ItemStatus::Active);
    assert_eq!(item.status, ItemStatus::Active);
}

#[tokio::test]
async fn test_short_ifsc_sends_no_request() {
    let stub = common::serve(Router::new()).await;
    let account = BankAccount {
        vendor_id: "v1".to_string(),
        account_holder_name: "Asha Rao".to_string(),
        account_number: "123456789012".to_string(),
        ifsc_code: "SBIN00".to_string(),
        bank_name: "State Bank".to_string(),
        branch_name: "Kothrud".to_string(),
        account_type: AccountType::Savings,
        ..Default::default()
    };

    let err = stub.client.add_account(&account).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(stub.hits(), 0);
}

#[tokio::test]
async fn test_success_false_is_rejected() {
    let routes = Router::new().route(
        "/restaurant/categories",
        get(|| async { Json(json!({ "success": false, "message": "Vendor is blocked" })) }),
    );
    let stub = common::serve(routes).await;

    match stub.client.categories().await {
        Err(ApiError::Rejected { message, .. }) => assert_eq!(message, "Vendor is blocked"),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_data_envelope_is_unwrapped() {
    let routes = Router::new().route(
        "/restaurant/categories",
        get(|| async {
            Json(json!({
                "success": true,
                "data": [
                    { "_id": "c1", "vendorId": "v1", "categoryName": "Starters" },
                    { "_id": "c2", "vendorId": "v2", "categoryName": "Desserts" }
                ]
            }))
        }),
    );
    let stub = common::serve(routes).await;

    let categories = stub.client.categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].category_name, "Starters");
}

#[tokio::test]
async fn test_expired_plan_blocks_protected_routes() {
    let routes = Router::new().route(
        "/vendor/plan/{id}",
        get(|Path(id): Path<String>| async move {
            let expiry = if id == "paid" {
                "2999-01-01T00:00:00Z"
            } else {
                "2000-01-01T00:00:00Z"
            };
            Json(json!({ "data": { "isPlanPurchased": true, "planExpiry": expiry } }))
        }),
    );
    let stub = common::serve(routes).await;
    let guard = PlanGuard::default();
    let now = Utc::now();

    let expired = stub.client.plan_status("lapsed").await.unwrap();
    assert_eq!(
        guard.check("/category", expired.is_active(now)),
        Navigation::PlanRequired {
            requested: "/category".to_string()
        }
    );
    assert_eq!(
        guard.check("/plans", expired.is_active(now)),
        Navigation::Proceed("/plans".to_string())
    );

    let paid = stub.client.plan_status("paid").await.unwrap();
    assert_eq!(
        guard.check("/bookings", paid.is_active(now)),
        Navigation::Proceed("/bookings".to_string())
    );
}
