use axum::http::StatusCode;

use crate::state::test_helpers::{
    MockApi, body_string, get, location, post_form, send, set_cookie, test_app_state,
};

const VALID_SIGNUP: &str = "name=Asha+Rai&email=asha%40example.com&phone=9812345678&address=Kathmandu\
&password=Abcdef1%21&confirm_password=Abcdef1%21";

// =============================================================================
// LOGIN
// =============================================================================

#[tokio::test]
async fn login_with_remember_sets_persistent_cookie() {
    let api = MockApi::new().with_login("jwt-1");
    let body = "email=asha%40example.com&password=pw&remember=on&next=%2Fen%2Fdashboard";
    let resp = send(test_app_state(api), post_form("/en/auth/login", body)).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/en/dashboard");
    let cookie = set_cookie(&resp).unwrap();
    assert!(cookie.starts_with("yalakhom=jwt-1"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=1296000"));
}

#[tokio::test]
async fn login_without_remember_sets_session_cookie() {
    let api = MockApi::new().with_login("jwt-1");
    let resp = send(test_app_state(api), post_form("/ne/auth/login", "email=a%40b.c&password=pw")).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/ne/secure");
    let cookie = set_cookie(&resp).unwrap();
    assert!(cookie.starts_with("yalakhom=jwt-1"));
    assert!(!cookie.contains("Max-Age"));
}

#[tokio::test]
async fn login_ignores_offsite_next() {
    let api = MockApi::new().with_login("jwt-1");
    let body = "email=a%40b.c&password=pw&next=%2F%2Fevil.example";
    let resp = send(test_app_state(api), post_form("/en/auth/login", body)).await;
    assert_eq!(location(&resp), "/en/secure");
}

#[tokio::test]
async fn login_refuses_next_with_line_breaks() {
    let api = MockApi::new().with_login("jwt-1");
    let body = "email=a%40b.c&password=pw&next=%2Fen%0D%0ASet-Cookie%3Ax%3D1";
    let resp = send(test_app_state(api), post_form("/en/auth/login", body)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/en/secure");
}

#[tokio::test]
async fn failed_login_rerenders_with_backend_message() {
    let resp = send(test_app_state(MockApi::new()), post_form("/en/auth/login", "email=a%40b.c&password=bad")).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(set_cookie(&resp).is_none());
    let body = body_string(resp).await;
    assert!(body.contains("Invalid credentials"));
    assert!(body.contains("value=\"a@b.c\""));
}

#[tokio::test]
async fn login_page_carries_next() {
    let resp = send(test_app_state(MockApi::new()), get("/en/auth/login?next=%2Fen%2Fbookmark", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("value=\"/en/bookmark\""));
}

// =============================================================================
// SIGNUP & VERIFY
// =============================================================================

#[tokio::test]
async fn invalid_signup_is_unprocessable() {
    let resp = send(test_app_state(MockApi::new()), post_form("/en/auth/signup", "name=A&email=")).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(resp).await;
    assert!(body.contains("Please fix the highlighted fields."));
    assert!(body.contains("Name must be at least 2 characters."));
}

#[tokio::test]
async fn successful_signup_moves_to_otp_step() {
    let resp = send(test_app_state(MockApi::new()), post_form("/en/auth/signup", VALID_SIGNUP)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Registration successful!"));
    assert!(body.contains("action=\"/en/auth/verify-account\""));
    assert!(body.contains("value=\"asha@example.com\""));
}

#[tokio::test]
async fn backend_signup_errors_are_unprocessable() {
    let api = MockApi::new().with_register_response(409, r#"{"message":"Email already registered"}"#);
    let resp = send(test_app_state(api), post_form("/en/auth/signup", VALID_SIGNUP)).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(resp).await.contains("Email already registered"));
}

#[tokio::test]
async fn verified_account_goes_to_login() {
    let resp = send(
        test_app_state(MockApi::new()),
        post_form("/en/auth/verify-account", "email=asha%40example.com&otp=123456&action=verify"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/en/auth/login");
}

#[tokio::test]
async fn resend_otp_stays_on_page() {
    let resp = send(
        test_app_state(MockApi::new()),
        post_form("/en/auth/verify-account", "email=asha%40example.com&action=resend"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("value=\"asha@example.com\""));
}

#[tokio::test]
async fn rejected_otp_is_unprocessable() {
    let api = MockApi::new().with_otp_failure(400, r#"{"message":"Invalid OTP"}"#);
    let resp = send(
        test_app_state(api),
        post_form("/en/auth/verify-account", "email=asha%40example.com&otp=999999"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// SESSION
// =============================================================================

#[tokio::test]
async fn logout_clears_cookie_and_goes_home() {
    let resp = send(test_app_state(MockApi::new()), post_form("/zh/auth/logout", "")).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/zh/");
    assert!(set_cookie(&resp).unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn me_without_cookie_is_unauthorized() {
    let resp = send(test_app_state(MockApi::new()), get("/api/auth/me", None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&resp).is_none());
}

#[tokio::test]
async fn me_returns_current_user() {
    let api = MockApi::new().with_user("tok", "Asha");
    let resp = send(test_app_state(api), get("/api/auth/me", Some("yalakhom=tok"))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let user: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(user["name"], "Asha");
}

#[tokio::test]
async fn me_with_rejected_token_clears_cookie() {
    let resp = send(test_app_state(MockApi::new()), get("/api/auth/me", Some("yalakhom=stale"))).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&resp).unwrap().contains("Max-Age=0"));
}
