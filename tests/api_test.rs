use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use tasknest::{
    api,
    auth::AuthService,
    config::Settings,
    domain::{NewUser, PaymentStatus, UserRole},
    repository::{
        PaymentRepository, SqliteBookingRepository, SqlitePaymentRepository,
        SqliteServiceRepository, SqliteUserRepository, SqliteWorkerRepository, UserRepository,
    },
    service::ServiceContext,
};

struct TestApp {
    ctx: Arc<ServiceContext>,
    settings: Arc<Settings>,
    admin_token: String,
    customer_token: String,
}

impl TestApp {
    fn router(&self) -> Router {
        api::create_app(self.ctx.clone(), self.settings.clone())
    }
}

async fn test_app() -> anyhow::Result<TestApp> {
    // An in-memory SQLite database exists per connection, so the pool
    // must stay on a single long-lived connection.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(":memory:")
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let settings = Arc::new(Settings::default());
    let auth_service = Arc::new(AuthService::new(
        settings.auth.jwt_secret.clone(),
        settings.auth.token_ttl_hours,
    ));

    let ctx = Arc::new(ServiceContext::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteServiceRepository::new(pool.clone())),
        Arc::new(SqliteWorkerRepository::new(pool.clone())),
        Arc::new(SqliteBookingRepository::new(pool.clone())),
        Arc::new(SqlitePaymentRepository::new(pool.clone())),
        auth_service.clone(),
        settings.booking.clone(),
        pool,
    ));

    let admin = ctx
        .user_repo
        .create(NewUser {
            name: "Admin User".to_string(),
            email: "admin@tasknest.com".to_string(),
            password_hash: AuthService::hash_password("admin123")?,
            phone: None,
            address: None,
            city: None,
            role: UserRole::Admin,
        })
        .await?;
    let admin_token = auth_service.issue_token(&admin)?;

    let customer = ctx
        .user_repo
        .create(NewUser {
            name: "Test Customer".to_string(),
            email: "customer@example.com".to_string(),
            password_hash: AuthService::hash_password("password123")?,
            phone: Some("9876543210".to_string()),
            address: None,
            city: None,
            role: UserRole::Customer,
        })
        .await?;
    let customer_token = auth_service.issue_token(&customer)?;

    Ok(TestApp {
        ctx,
        settings,
        admin_token,
        customer_token,
    })
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn future_date() -> String {
    (Utc::now() + Duration::days(7)).format("%Y-%m-%d").to_string()
}

async fn seed_service(app: &TestApp, service_type: &str, price: f64) -> Value {
    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/admin/services",
            Some(app.admin_token.as_str()),
            Some(json!({
                "name": "Test Service",
                "type": service_type,
                "startingPrice": price,
                "description": "A service for tests",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    json_body(res).await["data"].clone()
}

// ── Health ──

#[tokio::test]
async fn test_health() {
    let app = test_app().await.unwrap();

    let res = app
        .router()
        .oneshot(request("GET", "/health", None, None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

// ── Auth ──

#[tokio::test]
async fn test_register_and_duplicate_conflict() {
    let app = test_app().await.unwrap();

    let body = json!({
        "name": "New User",
        "email": "new@example.com",
        "password": "password123",
    });

    let res = app
        .router()
        .oneshot(request("POST", "/auth/register", None, Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let json = json_body(res).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["user"]["role"], "CUSTOMER");
    assert!(json["data"]["token"].as_str().unwrap().len() > 0);

    let res = app
        .router()
        .oneshot(request("POST", "/auth/register", None, Some(body)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let json = json_body(res).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_register_validation_errors_are_field_scoped() {
    let app = test_app().await.unwrap();

    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/auth/register",
            None,
            Some(json!({
                "name": "X",
                "email": "not-an-email",
                "password": "short",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = json_body(res).await;
    assert_eq!(json["success"], false);
    assert!(json["errors"]["name"].is_array());
    assert!(json["errors"]["email"].is_array());
    assert!(json["errors"]["password"].is_array());
}

#[tokio::test]
async fn test_login_and_me() {
    let app = test_app().await.unwrap();

    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/auth/login",
            None,
            Some(json!({
                "email": "customer@example.com",
                "password": "password123",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    let token = json["data"]["token"].as_str().unwrap().to_string();

    let res = app
        .router()
        .oneshot(request("GET", "/auth/me", Some(token.as_str()), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json["data"]["email"], "customer@example.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = test_app().await.unwrap();

    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/auth/login",
            None,
            Some(json!({
                "email": "customer@example.com",
                "password": "wrong-password",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

// ── Authorization boundaries ──

#[tokio::test]
async fn test_admin_routes_reject_missing_and_non_admin_tokens() {
    let app = test_app().await.unwrap();

    for uri in ["/admin/bookings", "/admin/workers", "/admin/users", "/admin/dashboard"] {
        let res = app
            .router()
            .oneshot(request("GET", uri, None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "no token: {uri}");

        let res = app
            .router()
            .oneshot(request("GET", uri, Some(app.customer_token.as_str()), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "customer token: {uri}");
        let json = json_body(res).await;
        assert_eq!(json["success"], false);
    }
}

#[tokio::test]
async fn test_bookings_require_auth() {
    let app = test_app().await.unwrap();

    let res = app
        .router()
        .oneshot(request("GET", "/bookings", None, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .router()
        .oneshot(request("GET", "/bookings", Some("garbage-token"), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

// ── Service catalog ──

#[tokio::test]
async fn test_admin_created_service_round_trips_through_public_list() {
    let app = test_app().await.unwrap();

    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/admin/services",
            Some(app.admin_token.as_str()),
            Some(json!({
                "name": "Home-style Cooking",
                "type": "HOME_COOKING",
                "startingPrice": 399.0,
                "description": "Chef at home",
                "included": ["Chef visit", "Cleanup"],
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = json_body(res).await["data"].clone();

    let res = app
        .router()
        .oneshot(request("GET", "/services?type=HOME_COOKING", None, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    let listed = &json["data"][0];

    assert_eq!(listed["id"], created["id"]);
    assert_eq!(listed["name"], "Home-style Cooking");
    assert_eq!(listed["type"], "HOME_COOKING");
    assert_eq!(listed["startingPrice"], 399.0);
    assert_eq!(listed["included"], json!(["Chef visit", "Cleanup"]));
}

#[tokio::test]
async fn test_service_create_requires_admin() {
    let app = test_app().await.unwrap();

    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/admin/services",
            Some(app.customer_token.as_str()),
            Some(json!({
                "name": "Sneaky",
                "type": "HOME_COOKING",
                "startingPrice": 1.0,
                "description": "nope",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Nothing was created.
    let res = app
        .router()
        .oneshot(request("GET", "/services", None, None))
        .await
        .unwrap();
    let json = json_body(res).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

// ── Bookings ──

#[tokio::test]
async fn test_booking_lifecycle_over_http() {
    let app = test_app().await.unwrap();
    let service = seed_service(&app, "HOME_COOKING", 399.0).await;
    let service_id = service["id"].as_str().unwrap();

    // Create
    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/bookings",
            Some(app.customer_token.as_str()),
            Some(json!({
                "serviceId": service_id,
                "date": future_date(),
                "time": "10:00",
                "duration": 3,
                "address": "42 Lakeview Road, Rohini, Delhi",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let json = json_body(res).await;
    let booking = &json["data"];
    assert_eq!(booking["status"], "PENDING");
    assert_eq!(booking["finalPrice"], 1197.0);
    assert_eq!(booking["payment"]["amount"], 1197.0);
    assert_eq!(booking["payment"]["status"], "PENDING");
    let booking_id = booking["id"].as_str().unwrap().to_string();

    // The payment row landed in the same transaction as the booking
    let payment = app
        .ctx
        .payment_repo
        .find_by_booking(Uuid::parse_str(&booking_id).unwrap())
        .await
        .unwrap()
        .expect("payment row should exist");
    assert_eq!(payment.amount, 1197.0);
    assert_eq!(payment.status, PaymentStatus::Pending);

    // Own list shows it
    let res = app
        .router()
        .oneshot(request("GET", "/bookings", Some(app.customer_token.as_str()), None))
        .await
        .unwrap();
    let json = json_body(res).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Admin confirms it
    let res = app
        .router()
        .oneshot(request(
            "PUT",
            "/admin/bookings",
            Some(app.admin_token.as_str()),
            Some(json!({ "id": booking_id, "status": "CONFIRMED" })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json["data"]["status"], "CONFIRMED");

    // Owner-scoped fetch
    let res = app
        .router()
        .oneshot(request(
            "GET",
            &format!("/bookings/{booking_id}"),
            Some(app.customer_token.as_str()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json["data"]["status"], "CONFIRMED");
}

#[tokio::test]
async fn test_booking_validation_error_shape() {
    let app = test_app().await.unwrap();
    let service = seed_service(&app, "EVENT_COOKING", 299.0).await;
    let service_id = service["id"].as_str().unwrap();

    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/bookings",
            Some(app.customer_token.as_str()),
            Some(json!({
                "serviceId": service_id,
                "date": future_date(),
                "time": "18:00",
                "duration": 4,
                "guestCount": 2,
                "address": "short",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = json_body(res).await;
    assert_eq!(json["success"], false);
    assert!(json["errors"]["guestCount"][0]
        .as_str()
        .unwrap()
        .contains("Minimum 7 guests"));
    assert!(json["errors"]["address"][0]
        .as_str()
        .unwrap()
        .contains("minimum 10 characters"));
}

#[tokio::test]
async fn test_invalid_status_in_admin_update_is_rejected() {
    let app = test_app().await.unwrap();
    let service = seed_service(&app, "HOME_COOKING", 399.0).await;
    let service_id = service["id"].as_str().unwrap();

    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/bookings",
            Some(app.customer_token.as_str()),
            Some(json!({
                "serviceId": service_id,
                "date": future_date(),
                "time": "10:00",
                "duration": 2,
                "address": "42 Lakeview Road, Rohini, Delhi",
            })),
        ))
        .await
        .unwrap();
    let booking_id = json_body(res).await["data"]["id"].as_str().unwrap().to_string();

    let res = app
        .router()
        .oneshot(request(
            "PUT",
            "/admin/bookings",
            Some(app.admin_token.as_str()),
            Some(json!({ "id": booking_id, "status": "DONE" })),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = json_body(res).await;
    assert!(json["errors"]["status"].is_array());
}

// ── Workers and users admin CRUD ──

#[tokio::test]
async fn test_worker_crud_and_user_deactivation() {
    let app = test_app().await.unwrap();

    // Create a worker: starts INACTIVE
    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/admin/workers",
            Some(app.admin_token.as_str()),
            Some(json!({
                "name": "Chef Anand",
                "email": "anand@example.com",
                "phone": "9123456780",
                "serviceType": ["HOME_COOKING", "CUSTOM_COOKING"],
                "hourlyRate": 180.0,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let worker = json_body(res).await["data"].clone();
    assert_eq!(worker["status"], "INACTIVE");
    let worker_id = worker["id"].as_str().unwrap().to_string();

    // Activate via update
    let res = app
        .router()
        .oneshot(request(
            "PUT",
            "/admin/workers",
            Some(app.admin_token.as_str()),
            Some(json!({ "id": worker_id, "status": "ACTIVE" })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json["data"]["status"], "ACTIVE");

    // Status-filtered listing
    let res = app
        .router()
        .oneshot(request(
            "GET",
            "/admin/workers?status=ACTIVE",
            Some(app.admin_token.as_str()),
            None,
        ))
        .await
        .unwrap();
    let json = json_body(res).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["bookingCount"], 0);

    // Customer listing shows booking counts and deactivation works
    let res = app
        .router()
        .oneshot(request("GET", "/admin/users", Some(app.admin_token.as_str()), None))
        .await
        .unwrap();
    let json = json_body(res).await;
    let customer = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == "customer@example.com")
        .unwrap()
        .clone();

    let res = app
        .router()
        .oneshot(request(
            "PUT",
            "/admin/users",
            Some(app.admin_token.as_str()),
            Some(json!({ "id": customer["id"], "isActive": false })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json["data"]["isActive"], false);

    // The deactivated customer can no longer log in
    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/auth/login",
            None,
            Some(json!({
                "email": "customer@example.com",
                "password": "password123",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

// ── Dashboard ──

#[tokio::test]
async fn test_dashboard_counts() {
    let app = test_app().await.unwrap();
    let service = seed_service(&app, "HOME_COOKING", 399.0).await;
    let service_id = service["id"].as_str().unwrap();

    let res = app
        .router()
        .oneshot(request(
            "POST",
            "/bookings",
            Some(app.customer_token.as_str()),
            Some(json!({
                "serviceId": service_id,
                "date": future_date(),
                "time": "10:00",
                "duration": 2,
                "address": "42 Lakeview Road, Rohini, Delhi",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .router()
        .oneshot(request("GET", "/admin/dashboard", Some(app.admin_token.as_str()), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json["data"]["totalCustomers"], 1);
    assert_eq!(json["data"]["totalBookings"], 1);
    assert_eq!(json["data"]["activeWorkers"], 0);
    // No payment has been completed yet
    assert_eq!(json["data"]["totalRevenue"], 0.0);
    assert_eq!(json["data"]["recentBookings"].as_array().unwrap().len(), 1);
}
