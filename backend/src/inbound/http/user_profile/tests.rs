//! Tests for the profile handlers, driven through mocked ports.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    IdentityVerificationError, MockIdentityVerifier, MockUserProfileCommand,
    MockUserProfileQuery, UpsertOutcome,
};
use crate::domain::{Error, PhoneNumber, UserId, UserProfile};
use crate::inbound::http::validation::json_config;

const TOKEN: &str = "Bearer token-user-1";

fn verifier() -> MockIdentityVerifier {
    let mut verifier = MockIdentityVerifier::new();
    verifier.expect_verify().returning(|token| {
        token
            .strip_prefix("token-")
            .map(|id| UserId::new(id).expect("valid id"))
            .ok_or_else(|| IdentityVerificationError::rejected("unknown token"))
    });
    verifier
}

fn test_app(
    command: MockUserProfileCommand,
    query: MockUserProfileQuery,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(command), Arc::new(query), Arc::new(verifier()));
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .service(web::scope("/api/v1").configure(configure))
}

async fn send(
    command: MockUserProfileCommand,
    query: MockUserProfileQuery,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(command, query)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn authed(request: actix_test::TestRequest) -> actix_test::TestRequest {
    request.insert_header((AUTHORIZATION, TOKEN))
}

fn is_user_1(id: &UserId) -> bool {
    id.as_str() == "user-1"
}

#[rstest]
#[case(true, StatusCode::CREATED)]
#[case(false, StatusCode::OK)]
#[actix_web::test]
async fn upsert_reports_creation(#[case] created: bool, #[case] expected: StatusCode) {
    let mut command = MockUserProfileCommand::new();
    command
        .expect_upsert_user()
        .withf(is_user_1)
        .times(1)
        .returning(move |_| Ok(UpsertOutcome { created }));

    let (status, body) = send(
        command,
        MockUserProfileQuery::new(),
        authed(actix_test::TestRequest::put().uri("/api/v1/user")),
    )
    .await;

    assert_eq!(status, expected);
    assert_eq!(body, json!({"isUpserted": created}));
}

#[actix_web::test]
async fn upsert_surfaces_partial_failure() {
    let mut command = MockUserProfileCommand::new();
    command.expect_upsert_user().returning(|_| {
        Err(Error::internal("welcome event could not be published")
            .with_details(json!({
                "code": "welcome_event_not_published",
                "profileCreated": true,
            })))
    });

    let (status, body) = send(
        command,
        MockUserProfileQuery::new(),
        authed(actix_test::TestRequest::put().uri("/api/v1/user")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["details"]["code"], "welcome_event_not_published");
    assert_eq!(body["details"]["profileCreated"], true);
}

#[rstest]
#[case(actix_test::TestRequest::put().uri("/api/v1/user"))]
#[case(actix_test::TestRequest::get().uri("/api/v1/user"))]
#[case(actix_test::TestRequest::delete().uri("/api/v1/user"))]
#[case(actix_test::TestRequest::get().uri("/api/v1/user/test"))]
#[case(actix_test::TestRequest::get().uri("/api/v1/user/fcmTokens"))]
#[case(
    actix_test::TestRequest::put().uri("/api/v1/user/discord").set_json(json!({"discordId": "x"}))
)]
#[actix_web::test]
async fn every_route_requires_a_bearer_credential(#[case] request: actix_test::TestRequest) {
    let (status, body) = send(
        MockUserProfileCommand::new(),
        MockUserProfileQuery::new(),
        request,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn rejected_credential_is_unauthorised() {
    let (status, _) = send(
        MockUserProfileCommand::new(),
        MockUserProfileQuery::new(),
        actix_test::TestRequest::get()
            .uri("/api/v1/user/test")
            .insert_header((AUTHORIZATION, "Bearer forged")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn api_test_answers_authenticated_callers() {
    let (status, body) = send(
        MockUserProfileCommand::new(),
        MockUserProfileQuery::new(),
        authed(actix_test::TestRequest::get().uri("/api/v1/user/test")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": API_TEST_MESSAGE}));
}

#[actix_web::test]
async fn get_user_renders_the_profile() {
    let at = Utc
        .with_ymd_and_hms(2025, 5, 1, 8, 30, 0)
        .single()
        .expect("valid timestamp");
    let mut query = MockUserProfileQuery::new();
    query
        .expect_fetch_profile()
        .withf(is_user_1)
        .returning(move |id| Ok(UserProfile::new(id.clone(), at)));

    let (status, body) = send(
        MockUserProfileCommand::new(),
        query,
        authed(actix_test::TestRequest::get().uri("/api/v1/user")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], "user-1");
    assert_eq!(body["createdAt"], "2025-05-01T08:30:00+00:00");
    assert_eq!(body["whatsAppNumber"], "");
    assert_eq!(body["FCMtokens"], json!([]));
}

#[actix_web::test]
async fn get_user_maps_not_found() {
    let mut query = MockUserProfileQuery::new();
    query
        .expect_fetch_profile()
        .returning(|_| Err(Error::not_found("user profile not found")));

    let (status, body) = send(
        MockUserProfileCommand::new(),
        query,
        authed(actix_test::TestRequest::get().uri("/api/v1/user")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn delete_user_acknowledges() {
    let mut command = MockUserProfileCommand::new();
    command
        .expect_delete_user()
        .withf(is_user_1)
        .times(1)
        .returning(|_| Ok(()));

    let (status, body) = send(
        command,
        MockUserProfileQuery::new(),
        authed(actix_test::TestRequest::delete().uri("/api/v1/user")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": USER_DELETED_MESSAGE}));
}

#[rstest]
#[case("/api/v1/user/whatsapp", json!({"whatsAppNumber": "+14155552671"}))]
#[case("/api/v1/user/telegram", json!({"telegramNumber": ""}))]
#[case("/api/v1/user/discord", json!({"discordId": "ada#1815"}))]
#[case(
    "/api/v1/user/notificationInterfaces",
    json!({"notificationInterfaces": ["email", "whatsapp"]})
)]
#[case("/api/v1/user/webhooks", json!({"webhooks": ["https://hooks.example.com/in"]}))]
#[actix_web::test]
async fn edits_echo_the_stored_value(#[case] uri: &str, #[case] payload: Value) {
    let mut command = MockUserProfileCommand::new();
    command
        .expect_edit_field()
        .withf(|id, _| is_user_1(id))
        .times(1)
        .returning(|_, value| Ok(value));

    let (status, body) = send(
        command,
        MockUserProfileQuery::new(),
        authed(actix_test::TestRequest::put().uri(uri).set_json(&payload)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, payload);
}

#[rstest]
#[case(
    "/api/v1/user/whatsapp",
    json!({"whatsAppNumber": "123"}),
    "whatsAppNumber",
    "invalid_phone_number"
)]
#[case(
    "/api/v1/user/notificationInterfaces",
    json!({"notificationInterfaces": ["carrierPigeon"]}),
    "notificationInterfaces",
    "invalid_notification_interface"
)]
#[case(
    "/api/v1/user/webhooks",
    json!({"webhooks": ["ftp://example.com"]}),
    "webhooks",
    "invalid_url"
)]
#[case("/api/v1/user/fcmTokens", json!({"FCMtoken": " "}), "FCMtoken", "empty_fcm_token")]
#[case("/api/v1/user/discord", json!({}), "discordId", "missing_field")]
#[actix_web::test]
async fn invalid_bodies_never_reach_the_service(
    #[case] uri: &str,
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut command = MockUserProfileCommand::new();
    command.expect_edit_field().never();
    command.expect_add_fcm_token().never();

    let (status, body) = send(
        command,
        MockUserProfileQuery::new(),
        authed(actix_test::TestRequest::put().uri(uri).set_json(&payload)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn malformed_json_is_reported() {
    let (status, body) = send(
        MockUserProfileCommand::new(),
        MockUserProfileQuery::new(),
        authed(
            actix_test::TestRequest::put()
                .uri("/api/v1/user/whatsapp")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_json");
}

#[actix_web::test]
async fn edit_of_missing_profile_is_not_found() {
    let mut command = MockUserProfileCommand::new();
    command
        .expect_edit_field()
        .returning(|_, _| Err(Error::not_found("user profile not found")));

    let (status, _) = send(
        command,
        MockUserProfileQuery::new(),
        authed(
            actix_test::TestRequest::put()
                .uri("/api/v1/user/whatsapp")
                .set_json(json!({"whatsAppNumber": "+14155552671"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn fcm_tokens_are_added_and_removed() {
    let mut command = MockUserProfileCommand::new();
    command
        .expect_add_fcm_token()
        .withf(|id, token| is_user_1(id) && token.as_str() == "device-a")
        .times(1)
        .returning(|_, token| Ok(token));
    command
        .expect_delete_fcm_token()
        .withf(|id, token| is_user_1(id) && token.as_str() == "device-a")
        .times(1)
        .returning(|_, token| Ok(token));
    let app = actix_test::init_service(test_app(command, MockUserProfileQuery::new())).await;

    for request in [
        actix_test::TestRequest::put(),
        actix_test::TestRequest::delete(),
    ] {
        let response = actix_test::call_service(
            &app,
            authed(request.uri("/api/v1/user/fcmTokens"))
                .set_json(json!({"FCMtoken": "device-a"}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({"FCMtoken": "device-a"}));
    }
}

#[rstest]
#[case(
    "/api/v1/user/whatsapp",
    ProfileField::WhatsAppNumber,
    json!({"whatsAppNumber": "+14155552671"})
)]
#[case("/api/v1/user/discord", ProfileField::DiscordId, json!({"discordId": ""}))]
#[case("/api/v1/user/telegram", ProfileField::TelegramNumber, json!({"telegramNumber": ""}))]
#[case(
    "/api/v1/user/notificationInterfaces",
    ProfileField::NotificationInterfaces,
    json!({"notificationInterfaces": []})
)]
#[case("/api/v1/user/fcmTokens", ProfileField::FcmTokens, json!({"FCMtokens": []}))]
#[case("/api/v1/user/webhooks", ProfileField::Webhooks, json!({"webhooks": []}))]
#[actix_web::test]
async fn field_reads_project_one_member(
    #[case] uri: &str,
    #[case] field: ProfileField,
    #[case] expected: Value,
) {
    let at = Utc
        .with_ymd_and_hms(2025, 5, 1, 8, 30, 0)
        .single()
        .expect("valid timestamp");
    let mut profile = UserProfile::new(UserId::new("user-1").expect("valid id"), at);
    profile.whatsapp_number = PhoneNumber::new("+14155552671").expect("number");
    let mut query = MockUserProfileQuery::new();
    query
        .expect_fetch_field()
        .withf(move |id, requested| is_user_1(id) && *requested == field)
        .times(1)
        .returning(move |_, requested| Ok(profile.field(requested)));

    let (status, body) = send(
        MockUserProfileCommand::new(),
        query,
        authed(actix_test::TestRequest::get().uri(uri)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}
