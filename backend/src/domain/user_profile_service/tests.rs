//! Tests for the profile service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockUserProfileRepository, MockWebhookProbe, MockWelcomePublisher};
use crate::domain::{ErrorCode, NotificationInterfaces, PhoneNumber};
use crate::test_support::MutableClock;

type TestService =
    UserProfileService<MockUserProfileRepository, MockWelcomePublisher, MockWebhookProbe>;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn user_id() -> UserId {
    UserId::new("user-1").expect("valid user id")
}

fn make_service(
    repository: MockUserProfileRepository,
    publisher: MockWelcomePublisher,
    probe: MockWebhookProbe,
    now: DateTime<Utc>,
) -> TestService {
    UserProfileService::new(
        Arc::new(repository),
        Arc::new(publisher),
        Arc::new(probe),
        Arc::new(MutableClock::new(now)),
    )
}

/// Repository whose profile exists with no webhooks stored yet.
fn existing_profile() -> MockUserProfileRepository {
    let mut repository = MockUserProfileRepository::new();
    repository
        .expect_read_field()
        .withf(|_, field| *field == ProfileField::Webhooks)
        .times(1)
        .return_once(|_, _| Ok(Some(ProfileFieldValue::Webhooks(Vec::new()))));
    repository
}

fn webhooks(urls: &[&str]) -> Vec<WebhookUrl> {
    urls.iter()
        .map(|url| WebhookUrl::new(*url).expect("valid webhook"))
        .collect()
}

#[rstest]
#[tokio::test]
async fn upsert_creates_profile_and_publishes_once(user_id: UserId, now: DateTime<Utc>) {
    let mut repository = MockUserProfileRepository::new();
    let expected_id = user_id.clone();
    repository
        .expect_insert_if_absent()
        .withf(move |profile| {
            profile.user_id == expected_id && profile.created_at == now && profile.updated_at == now
        })
        .times(1)
        .return_once(|_| Ok(true));
    let mut publisher = MockWelcomePublisher::new();
    let published_id = user_id.clone();
    publisher
        .expect_publish()
        .withf(move |id| *id == published_id)
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(repository, publisher, MockWebhookProbe::new(), now);
    let outcome = service.upsert_user(&user_id).await.expect("upsert succeeds");

    assert!(outcome.created);
}

#[rstest]
#[tokio::test]
async fn upsert_of_existing_profile_does_not_publish(user_id: UserId, now: DateTime<Utc>) {
    let mut repository = MockUserProfileRepository::new();
    repository
        .expect_insert_if_absent()
        .times(1)
        .return_once(|_| Ok(false));
    let mut publisher = MockWelcomePublisher::new();
    publisher.expect_publish().times(0);

    let service = make_service(repository, publisher, MockWebhookProbe::new(), now);
    let outcome = service.upsert_user(&user_id).await.expect("upsert succeeds");

    assert!(!outcome.created);
}

#[rstest]
#[tokio::test]
async fn publish_failure_reports_partial_creation(user_id: UserId, now: DateTime<Utc>) {
    let mut repository = MockUserProfileRepository::new();
    repository
        .expect_insert_if_absent()
        .return_once(|_| Ok(true));
    repository.expect_delete().times(0);
    let mut publisher = MockWelcomePublisher::new();
    publisher
        .expect_publish()
        .return_once(|_| Err(WelcomePublisherError::timeout(5_u64)));

    let service = make_service(repository, publisher, MockWebhookProbe::new(), now);
    let error = service.upsert_user(&user_id).await.expect_err("publish fails");

    assert_eq!(error.code(), ErrorCode::InternalError);
    let details = error.details().expect("details present");
    assert_eq!(details["code"], WELCOME_NOT_PUBLISHED_CODE);
    assert_eq!(details["profileCreated"], true);
}

#[rstest]
#[case(UserProfileRepositoryError::connection("refused"))]
#[case(UserProfileRepositoryError::timeout("insert"))]
#[case(UserProfileRepositoryError::query("syntax error"))]
#[tokio::test]
async fn store_failures_are_internal_errors(
    user_id: UserId,
    now: DateTime<Utc>,
    #[case] failure: UserProfileRepositoryError,
) {
    let mut repository = MockUserProfileRepository::new();
    repository
        .expect_insert_if_absent()
        .return_once(move |_| Err(failure));
    let mut publisher = MockWelcomePublisher::new();
    publisher.expect_publish().times(0);

    let service = make_service(repository, publisher, MockWebhookProbe::new(), now);
    let error = service.upsert_user(&user_id).await.expect_err("store fails");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert!(error.details().is_none());
}

#[rstest]
#[tokio::test]
async fn edit_stamps_updated_at_and_echoes_value(user_id: UserId, now: DateTime<Utc>) {
    let phone = PhoneNumber::new("+14155552671").expect("valid phone");
    let value = ProfileFieldValue::WhatsAppNumber(phone);
    let expected = value.clone();
    let mut repository = MockUserProfileRepository::new();
    repository
        .expect_update_field()
        .withf(move |_, v, at| *v == expected && *at == now)
        .times(1)
        .return_once(|_, _, _| Ok(true));

    let service = make_service(
        repository,
        MockWelcomePublisher::new(),
        MockWebhookProbe::new(),
        now,
    );
    let echoed = service
        .edit_field(&user_id, value.clone())
        .await
        .expect("edit succeeds");

    assert_eq!(echoed, value);
}

#[rstest]
#[tokio::test]
async fn edit_of_missing_profile_is_not_found(user_id: UserId, now: DateTime<Utc>) {
    let mut repository = MockUserProfileRepository::new();
    repository
        .expect_update_field()
        .return_once(|_, _, _| Ok(false));
    repository.expect_insert_if_absent().times(0);

    let service = make_service(
        repository,
        MockWelcomePublisher::new(),
        MockWebhookProbe::new(),
        now,
    );
    let value = ProfileFieldValue::NotificationInterfaces(
        NotificationInterfaces::parse(["email"]).expect("valid interfaces"),
    );
    let error = service
        .edit_field(&user_id, value)
        .await
        .expect_err("profile missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn webhooks_are_probed_before_storing(user_id: UserId, now: DateTime<Utc>) {
    let mut probe = MockWebhookProbe::new();
    probe.expect_probe().times(2).returning(|_| Ok(()));
    let mut repository = existing_profile();
    repository
        .expect_update_field()
        .times(1)
        .return_once(|_, _, _| Ok(true));

    let service = make_service(repository, MockWelcomePublisher::new(), probe, now);
    let value = ProfileFieldValue::Webhooks(webhooks(&[
        "https://a.example.com/hook",
        "https://b.example.com/hook",
    ]));

    service
        .edit_field(&user_id, value)
        .await
        .expect("reachable webhooks are stored");
}

#[rstest]
#[tokio::test]
async fn webhooks_of_missing_profile_are_never_contacted(user_id: UserId, now: DateTime<Utc>) {
    let mut probe = MockWebhookProbe::new();
    probe.expect_probe().never();
    let mut repository = MockUserProfileRepository::new();
    repository
        .expect_read_field()
        .times(1)
        .return_once(|_, _| Ok(None));
    repository.expect_update_field().never();

    let service = make_service(repository, MockWelcomePublisher::new(), probe, now);
    let value = ProfileFieldValue::Webhooks(webhooks(&["https://victim.example.com/hook"]));
    let error = service
        .edit_field(&user_id, value)
        .await
        .expect_err("profile missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn unreachable_webhook_rejects_the_whole_set(user_id: UserId, now: DateTime<Utc>) {
    let mut probe = MockWebhookProbe::new();
    probe
        .expect_probe()
        .returning(|url| {
            let url = url.to_string();
            if url.contains("down.example.com") {
                Err(WebhookProbeError::unexpected_status(url, 503_u16))
            } else {
                Ok(())
            }
        });
    let mut repository = existing_profile();
    repository.expect_update_field().times(0);

    let service = make_service(repository, MockWelcomePublisher::new(), probe, now);
    let value = ProfileFieldValue::Webhooks(webhooks(&[
        "https://up.example.com/hook",
        "https://down.example.com/hook",
    ]));
    let error = service
        .edit_field(&user_id, value)
        .await
        .expect_err("unreachable webhook");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details present");
    assert_eq!(details["code"], UNREACHABLE_WEBHOOK_CODE);
    assert_eq!(details["index"], 1);
    assert_eq!(details["value"], "https://down.example.com/hook");
}

#[rstest]
#[tokio::test]
async fn fcm_token_operations_require_a_profile(user_id: UserId, now: DateTime<Utc>) {
    let mut repository = MockUserProfileRepository::new();
    repository
        .expect_push_fcm_token()
        .return_once(|_, _, _| Ok(true));
    repository
        .expect_pull_fcm_token()
        .return_once(|_, _, _| Ok(false));

    let service = make_service(
        repository,
        MockWelcomePublisher::new(),
        MockWebhookProbe::new(),
        now,
    );
    let token = FcmToken::new("device-token").expect("valid token");

    let added = service
        .add_fcm_token(&user_id, token.clone())
        .await
        .expect("push succeeds");
    assert_eq!(added, token);

    let error = service
        .delete_fcm_token(&user_id, token)
        .await
        .expect_err("no profile");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn delete_is_idempotent(user_id: UserId, now: DateTime<Utc>, #[case] existed: bool) {
    let mut repository = MockUserProfileRepository::new();
    repository
        .expect_delete()
        .times(1)
        .return_once(move |_| Ok(existed));

    let service = make_service(
        repository,
        MockWelcomePublisher::new(),
        MockWebhookProbe::new(),
        now,
    );

    service.delete_user(&user_id).await.expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn fetch_missing_profile_is_not_found(user_id: UserId, now: DateTime<Utc>) {
    let mut repository = MockUserProfileRepository::new();
    repository
        .expect_find_by_user_id()
        .return_once(|_| Ok(None));
    repository.expect_read_field().return_once(|_, _| Ok(None));

    let service = make_service(
        repository,
        MockWelcomePublisher::new(),
        MockWebhookProbe::new(),
        now,
    );

    let error = service
        .fetch_profile(&user_id)
        .await
        .expect_err("no profile");
    assert_eq!(error.code(), ErrorCode::NotFound);

    let error = service
        .fetch_field(&user_id, ProfileField::DiscordId)
        .await
        .expect_err("no profile");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn fetch_field_returns_projection(user_id: UserId, now: DateTime<Utc>) {
    let mut repository = MockUserProfileRepository::new();
    repository
        .expect_read_field()
        .withf(|_, field| *field == ProfileField::TelegramNumber)
        .return_once(|_, _| {
            Ok(Some(ProfileFieldValue::TelegramNumber(
                PhoneNumber::new("+447911123456").expect("valid phone"),
            )))
        });

    let service = make_service(
        repository,
        MockWelcomePublisher::new(),
        MockWebhookProbe::new(),
        now,
    );
    let value = service
        .fetch_field(&user_id, ProfileField::TelegramNumber)
        .await
        .expect("field read");

    assert_eq!(
        value,
        ProfileFieldValue::TelegramNumber(PhoneNumber::new("+447911123456").expect("valid"))
    );
}
