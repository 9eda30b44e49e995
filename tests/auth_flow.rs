//! End-to-end tests against a real Postgres instance.
//!
//! Ignored by default: they need `DATABASE_URL` pointing at a database with
//! `migrations/0001_init.sql` applied. Run with `cargo test -- --ignored`.

use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use dotenv::dotenv;
use serde_json::json;
use sqlx::PgPool;
use todoforge::auth::{AuthMiddleware, TokenResponse};
use todoforge::config::Config;
use todoforge::models::Task;
use todoforge::routes;

async fn test_pool() -> PgPool {
    dotenv().ok();
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration_test_secret");
    }
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB")
}

async fn remove_user(pool: &PgPool, username: &str) {
    let _ = sqlx::query(
        "DELETE FROM tasks WHERE owner_id IN (SELECT id FROM users WHERE username = $1)",
    )
    .bind(username)
    .execute(pool)
    .await;
    let _ = sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await;
}

fn register_payload(username: &str, role: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "first_name": "Test",
        "last_name": "User",
        "password": "pw123",
        "role": role
    })
}

// Logs a user in through the form endpoint and yields the bearer token.
macro_rules! login {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/auth/token")
            .set_form(&[("username", $username), ("password", "pw123")])
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::OK,
            "Login failed for {}",
            $username
        );

        let token_response: TokenResponse = test::read_body_json(resp).await;
        assert_eq!(token_response.token_type, "bearer");
        assert!(!token_response.access_token.is_empty());
        token_response.access_token
    }};
}

macro_rules! e2e_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .app_data(web::Data::new(Config::from_env()))
                .wrap(AuthMiddleware)
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .configure(routes::config),
        )
        .await
    };
}

#[ignore]
#[actix_rt::test]
async fn test_register_login_and_todo_crud_flow() {
    let pool = test_pool().await;
    remove_user(&pool, "e2e_alice").await;
    remove_user(&pool, "e2e_bob").await;

    let app = e2e_app!(pool);

    // Register alice
    let req = test::TestRequest::post()
        .uri("/auth")
        .set_json(register_payload("e2e_alice", "user"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "e2e_alice");
    assert!(body.get("password_hash").is_none());

    // Duplicate registration is a conflict
    let req = test::TestRequest::post()
        .uri("/auth")
        .set_json(register_payload("e2e_alice", "user"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Wrong password is a 401, not a success-shaped body
    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_form(&[("username", "e2e_alice"), ("password", "wrong_pw")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let alice_token = login!(&app, "e2e_alice");

    // Create a todo
    let req = test::TestRequest::post()
        .uri("/todo")
        .insert_header(("Authorization", format!("Bearer {}", alice_token)))
        .set_json(json!({
            "title": "buy milk",
            "description": "2% milk",
            "priority": 3,
            "complete": false
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Task = test::read_body_json(resp).await;
    assert_eq!(created.title, "buy milk");
    assert_eq!(created.description, "2% milk");
    assert_eq!(created.priority, 3);
    assert!(!created.complete);

    // Alice sees exactly her one task
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", format!("Bearer {}", alice_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<Task> = test::read_body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, created.id);
    assert_eq!(tasks[0].owner_id, created.owner_id);

    // Fetch by id
    let req = test::TestRequest::get()
        .uri(&format!("/todo/{}", created.id))
        .insert_header(("Authorization", format!("Bearer {}", alice_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Update
    let req = test::TestRequest::put()
        .uri(&format!("/todo/{}", created.id))
        .insert_header(("Authorization", format!("Bearer {}", alice_token)))
        .set_json(json!({
            "title": "buy milk",
            "description": "whole milk instead",
            "priority": 5,
            "complete": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/todo/{}", created.id))
        .insert_header(("Authorization", format!("Bearer {}", alice_token)))
        .to_request();
    let updated: Task = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(updated.description, "whole milk instead");
    assert_eq!(updated.priority, 5);
    assert!(updated.complete);

    // A second user sees an empty list and cannot touch alice's task
    let req = test::TestRequest::post()
        .uri("/auth")
        .set_json(register_payload("e2e_bob", "user"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );
    let bob_token = login!(&app, "e2e_bob");

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .to_request();
    let tasks: Vec<Task> = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(tasks.is_empty());

    // Foreign-owned task id is indistinguishable from a nonexistent one
    let req = test::TestRequest::get()
        .uri(&format!("/todo/{}", created.id))
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/todo/{}", created.id))
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    // Bob's failed delete mutated nothing
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", format!("Bearer {}", alice_token)))
        .to_request();
    let tasks: Vec<Task> = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(tasks.len(), 1);

    // Owner delete works and the task is gone
    let req = test::TestRequest::delete()
        .uri(&format!("/todo/{}", created.id))
        .insert_header(("Authorization", format!("Bearer {}", alice_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::get()
        .uri(&format!("/todo/{}", created.id))
        .insert_header(("Authorization", format!("Bearer {}", alice_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    remove_user(&pool, "e2e_alice").await;
    remove_user(&pool, "e2e_bob").await;
}

#[ignore]
#[actix_rt::test]
async fn test_todo_validation_rejected_at_boundary() {
    let pool = test_pool().await;
    remove_user(&pool, "e2e_carol").await;

    let app = e2e_app!(pool);

    let req = test::TestRequest::post()
        .uri("/auth")
        .set_json(register_payload("e2e_carol", "user"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );
    let token = login!(&app, "e2e_carol");

    let invalid_payloads = [
        json!({"title": "ok title", "description": "ok desc", "priority": 0, "complete": false}),
        json!({"title": "ok title", "description": "ok desc", "priority": 6, "complete": false}),
        json!({"title": "ok title", "description": "ab", "priority": 3, "complete": false}),
        json!({"title": "ok title", "description": "c".repeat(101), "priority": 3, "complete": false}),
        json!({"title": "ab", "description": "ok desc", "priority": 3, "complete": false}),
    ];

    for payload in invalid_payloads {
        let req = test::TestRequest::post()
            .uri("/todo")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "payload should have been rejected: {}",
            payload
        );
    }

    // Nothing was persisted
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let tasks: Vec<Task> = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(tasks.is_empty());

    remove_user(&pool, "e2e_carol").await;
}

#[ignore]
#[actix_rt::test]
async fn test_admin_listing_spans_all_users() {
    let pool = test_pool().await;
    remove_user(&pool, "e2e_dave").await;
    remove_user(&pool, "e2e_root").await;

    let app = e2e_app!(pool);

    for (username, role) in [("e2e_dave", "user"), ("e2e_root", "admin")] {
        let req = test::TestRequest::post()
            .uri("/auth")
            .set_json(register_payload(username, role))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let dave_token = login!(&app, "e2e_dave");
    let admin_token = login!(&app, "e2e_root");

    let req = test::TestRequest::post()
        .uri("/todo")
        .insert_header(("Authorization", format!("Bearer {}", dave_token)))
        .set_json(json!({
            "title": "dave's task",
            "description": "only dave's",
            "priority": 2,
            "complete": false
        }))
        .to_request();
    let created: Task = test::read_body_json(test::call_service(&app, req).await).await;

    // Non-admin is denied
    let req = test::TestRequest::get()
        .uri("/admin/todo")
        .insert_header(("Authorization", format!("Bearer {}", dave_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    // Admin sees tasks across users, including dave's
    let req = test::TestRequest::get()
        .uri("/admin/todo")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<Task> = test::read_body_json(resp).await;
    assert!(tasks.iter().any(|t| t.id == created.id));

    remove_user(&pool, "e2e_dave").await;
    remove_user(&pool, "e2e_root").await;
}
