//! Integration tests for the REST client against an in-process mock backend.

mod common;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::get,
};
use common::{project_json, serve, spawn_backend};
use devfolio::api::ApiClient;
use devfolio::domain::{
    ContactSubmission, Credentials, ProjectCategory, ProjectDraft, ProjectType, Registration,
    ResourceId, TestimonialDraft, Timeline,
};
use devfolio::error::{ApiError, FailureClass};
use serde_json::json;
use std::time::Duration;

fn draft(title: &str) -> ProjectDraft {
    ProjectDraft {
        title: title.into(),
        description: "Built with care".into(),
        category: ProjectCategory::Mobile,
        tech_stack: vec!["Flutter".into()],
        live_demo: None,
        github: Some("https://github.com/example/app".into()),
        play_store: None,
        app_store: None,
        featured: true,
        images: vec![],
    }
}

#[tokio::test]
async fn test_lists_featured_projects_under_api_prefix() {
    let backend = spawn_backend().await;
    *backend.state.projects.lock().unwrap() = vec![project_json(1, "A"), project_json(2, "B")];

    let client = ApiClient::new(&backend.base_url).unwrap();
    let featured = client.get_featured_projects().await.expect("list featured");

    let titles: Vec<_> = featured.data.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
    assert_eq!(featured.data[0].id, ResourceId::Number(1));
    assert_eq!(backend.state.project_lists(), 1);
}

#[tokio::test]
async fn test_missing_data_is_empty_but_wrong_shape_fails() {
    let base = serve(
        Router::new()
            .route("/api/projects", get(|| async { Json(json!({"ok": true})) }))
            .route(
                "/api/testimonials",
                get(|| async { Json(json!({"data": "nope"})) }),
            ),
    )
    .await;
    let client = ApiClient::new(&base).unwrap();

    let projects = client.get_projects().await.expect("envelope without data");
    assert!(projects.data.is_empty());

    let err = client.get_testimonials().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_rate_limit_is_classified_and_propagated() {
    let backend = spawn_backend().await;
    *backend.state.list_status.lock().unwrap() = Some(429);

    let client = ApiClient::new(&backend.base_url).unwrap();
    let err = client.get_featured_testimonials().await.unwrap_err();

    assert_eq!(err.status(), Some(429));
    assert_eq!(err.class(), FailureClass::RateLimited);
    assert_eq!(err.server_message(), Some("forced failure"));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let backend = spawn_backend().await;
    *backend.state.list_delay.lock().unwrap() = Duration::from_millis(500);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let client = ApiClient::with_client(&backend.base_url, http).unwrap();

    let err = client.get_projects().await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout), "got {err:?}");
    assert_eq!(err.class(), FailureClass::Timeout);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(format!("http://{addr}/api")).unwrap();
    let err = client.check_health().await.unwrap_err();

    assert!(matches!(err, ApiError::Http(_)), "got {err:?}");
    assert_eq!(err.class(), FailureClass::Other);
}

#[tokio::test]
async fn test_submit_contact_sends_labels() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url).unwrap();

    let ack = client
        .submit_contact(&ContactSubmission {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: Some("+254 700 000 000".into()),
            company: None,
            project_type: ProjectType::UiUxDesign,
            budget: None,
            timeline: Some(Timeline::TwoToThreeMonths),
            message: "Redesign please".into(),
        })
        .await
        .expect("contact accepted");

    assert_eq!(ack.success, Some(true));
    let contacts = backend.state.contacts.lock().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["projectType"], "UI/UX Design");
    assert_eq!(contacts[0]["timeline"], "2-3 Months");
    assert!(contacts[0].get("company").is_none());
}

#[tokio::test]
async fn test_health() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url).unwrap();

    let health = client.check_health().await.unwrap();
    assert_eq!(health.status, "OK");
}

#[tokio::test]
async fn test_login_token_is_attached_to_admin_calls() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url).unwrap();
    let admin = client.admin();

    // Anonymous call first.
    admin.create_project(&draft("Before")).await.unwrap();

    let auth = admin
        .login(&Credentials {
            email: "admin@example.com".into(),
            password: "correct horse".into(),
        })
        .await
        .expect("login");
    assert_eq!(auth.token, "session-token-123");
    assert!(client.session().is_authenticated());

    let created = admin.create_project(&draft("After")).await.unwrap();
    assert_eq!(created.data.unwrap().id, ResourceId::Number(2));

    let headers = backend.state.auth_headers.lock().unwrap().clone();
    assert_eq!(
        headers,
        vec![None, Some("Bearer session-token-123".to_string())]
    );

    admin.logout();
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_failed_login_keeps_session_empty() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url).unwrap();

    let err = client
        .admin()
        .login(&Credentials {
            email: "admin@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.server_message(), Some("Invalid credentials"));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_update_and_delete_by_id() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url).unwrap();
    let admin = client.admin();

    let updated = admin
        .update_project(&ResourceId::Number(7), &draft("Renamed"))
        .await
        .unwrap();
    let project = updated.data.unwrap();
    assert_eq!(project.id, ResourceId::Number(7));
    assert_eq!(project.title, "Renamed");
    assert_eq!(updated.message.as_deref(), Some("Project updated"));

    // 204 with no body.
    let deleted = admin
        .delete_testimonial(&ResourceId::Text("abc".into()))
        .await
        .unwrap();
    assert_eq!(deleted.data, None);

    admin.delete_project(&ResourceId::Number(7)).await.unwrap();
}

#[tokio::test]
async fn test_non_json_error_body_has_no_message() {
    let base = serve(Router::new().route(
        "/api/health",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    ))
    .await;
    let client = ApiClient::new(&base).unwrap();

    let err = client.check_health().await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_update_testimonial_sends_put_with_bearer() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url).unwrap();
    client.session().set_token("session-token-123");

    let ack = client
        .admin()
        .update_testimonial(
            &ResourceId::Text("t-9".into()),
            &TestimonialDraft {
                client_name: "John Doe".into(),
                position: "Founder".into(),
                company: "Tech Corp".into(),
                content: "Even better the second time".into(),
                rating: 4,
                project: None,
                avatar: None,
                featured: false,
            },
        )
        .await
        .expect("update accepted");

    let testimonial = ack.data.expect("echoed testimonial");
    assert_eq!(testimonial.id, ResourceId::Text("t-9".into()));
    assert_eq!(testimonial.client_name, "John Doe");
    assert_eq!(testimonial.rating, 4);
    assert!(!testimonial.featured);
    assert_eq!(ack.message.as_deref(), Some("Testimonial updated"));

    assert_eq!(
        *backend.state.requests.lock().unwrap(),
        vec!["PUT /api/admin/testimonials/t-9".to_string()]
    );
    assert_eq!(
        *backend.state.auth_headers.lock().unwrap(),
        vec![Some("Bearer session-token-123".to_string())]
    );
}

#[tokio::test]
async fn test_register_posts_account_and_leaves_session_alone() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url).unwrap();

    let auth = client
        .admin()
        .register(&Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "correct horse".into(),
        })
        .await
        .expect("registered");

    assert_eq!(auth.token, "fresh-account-token");
    assert_eq!(auth.message.as_deref(), Some("Account created"));
    assert_eq!(auth.user.as_ref().unwrap()["email"], "ada@example.com");
    assert!(!client.session().is_authenticated());

    assert_eq!(
        *backend.state.requests.lock().unwrap(),
        vec!["POST /api/auth/register".to_string()]
    );
    let registrations = backend.state.registrations.lock().unwrap();
    assert_eq!(registrations[0]["name"], "Ada");
    assert_eq!(registrations[0]["password"], "correct horse");
}
