//! In-memory adapters and a controllable clock.
//!
//! Compiled for unit tests and, through the `test-support` feature, for the
//! integration suites under `tests/`. Each adapter implements a driven port
//! without I/O so the full service and HTTP stack can run in-process.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;

use crate::domain::ports::{
    IdentityVerificationError, IdentityVerifier, UserProfileRepository,
    UserProfileRepositoryError, WebhookProbe, WebhookProbeError, WelcomePublisher,
    WelcomePublisherError,
};
use crate::domain::{FcmToken, ProfileField, ProfileFieldValue, UserId, UserProfile, WebhookUrl};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Profile store backed by a `HashMap`, with optional failure injection.
#[derive(Debug, Default)]
pub struct InMemoryUserProfileRepository {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
    failure: Mutex<Option<UserProfileRepositoryError>>,
}

impl InMemoryUserProfileRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `error`; `None` heals the store.
    pub fn fail_with(&self, error: Option<UserProfileRepositoryError>) {
        *lock(&self.failure) = error;
    }

    /// Snapshot of a stored profile.
    pub fn get(&self, user_id: &UserId) -> Option<UserProfile> {
        lock(&self.profiles).get(user_id).cloned()
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        lock(&self.profiles).len()
    }

    /// Whether the store holds no profiles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), UserProfileRepositoryError> {
        match lock(&self.failure).clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn mutate(
        &self,
        user_id: &UserId,
        updated_at: DateTime<Utc>,
        change: impl FnOnce(&mut UserProfile),
    ) -> Result<bool, UserProfileRepositoryError> {
        self.check()?;
        let mut profiles = lock(&self.profiles);
        Ok(match profiles.get_mut(user_id) {
            Some(profile) => {
                change(profile);
                profile.updated_at = updated_at;
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl UserProfileRepository for InMemoryUserProfileRepository {
    async fn insert_if_absent(
        &self,
        profile: &UserProfile,
    ) -> Result<bool, UserProfileRepositoryError> {
        self.check()?;
        let mut profiles = lock(&self.profiles);
        if profiles.contains_key(&profile.user_id) {
            return Ok(false);
        }
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(true)
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        self.check()?;
        Ok(self.get(user_id))
    }

    async fn update_field(
        &self,
        user_id: &UserId,
        value: &ProfileFieldValue,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserProfileRepositoryError> {
        self.mutate(user_id, updated_at, |profile| {
            profile.apply(value.clone(), updated_at);
        })
    }

    async fn read_field(
        &self,
        user_id: &UserId,
        field: ProfileField,
    ) -> Result<Option<ProfileFieldValue>, UserProfileRepositoryError> {
        self.check()?;
        Ok(lock(&self.profiles)
            .get(user_id)
            .map(|profile| profile.field(field)))
    }

    async fn push_fcm_token(
        &self,
        user_id: &UserId,
        token: &FcmToken,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserProfileRepositoryError> {
        self.mutate(user_id, updated_at, |profile| {
            profile.fcm_tokens.push(token.clone());
        })
    }

    async fn pull_fcm_token(
        &self,
        user_id: &UserId,
        token: &FcmToken,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserProfileRepositoryError> {
        self.mutate(user_id, updated_at, |profile| {
            profile.fcm_tokens.retain(|stored| stored != token);
        })
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, UserProfileRepositoryError> {
        self.check()?;
        Ok(lock(&self.profiles).remove(user_id).is_some())
    }
}

/// Publisher that records every user id it is asked to announce.
#[derive(Debug, Default)]
pub struct RecordingWelcomePublisher {
    published: Mutex<Vec<UserId>>,
    failure: Mutex<Option<WelcomePublisherError>>,
}

impl RecordingWelcomePublisher {
    /// Publisher that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail subsequent publishes with `error`; `None` restores success.
    pub fn fail_with(&self, error: Option<WelcomePublisherError>) {
        *lock(&self.failure) = error;
    }

    /// User ids successfully published, in order.
    pub fn published(&self) -> Vec<UserId> {
        lock(&self.published).clone()
    }
}

#[async_trait]
impl WelcomePublisher for RecordingWelcomePublisher {
    async fn publish(&self, user_id: &UserId) -> Result<(), WelcomePublisherError> {
        if let Some(error) = lock(&self.failure).clone() {
            return Err(error);
        }
        lock(&self.published).push(user_id.clone());
        Ok(())
    }
}

/// Probe answering 200 for every URL except those marked unreachable.
#[derive(Debug, Default)]
pub struct StaticWebhookProbe {
    unreachable: Mutex<HashSet<String>>,
    probed: Mutex<Vec<String>>,
}

impl StaticWebhookProbe {
    /// Probe that accepts every URL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make probes of `url` fail.
    pub fn mark_unreachable(&self, url: impl Into<String>) {
        lock(&self.unreachable).insert(url.into());
    }

    /// URLs probed so far, in order.
    pub fn probed(&self) -> Vec<String> {
        lock(&self.probed).clone()
    }
}

#[async_trait]
impl WebhookProbe for StaticWebhookProbe {
    async fn probe(&self, url: &WebhookUrl) -> Result<(), WebhookProbeError> {
        lock(&self.probed).push(url.to_string());
        if lock(&self.unreachable).contains(url.as_str()) {
            return Err(WebhookProbeError::unreachable(
                url.as_str(),
                "connection refused",
            ));
        }
        Ok(())
    }
}

/// Verifier resolving a fixed table of bearer tokens.
#[derive(Debug, Default)]
pub struct StaticIdentityVerifier {
    tokens: HashMap<String, UserId>,
}

impl StaticIdentityVerifier {
    /// Verifier that rejects everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as `user_id`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, user_id: UserId) -> Self {
        self.tokens.insert(token.into(), user_id);
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, credential: &str) -> Result<UserId, IdentityVerificationError> {
        self.tokens
            .get(credential)
            .cloned()
            .ok_or_else(|| IdentityVerificationError::rejected("unknown token"))
    }
}

/// Clock whose time only moves when told to.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = lock(&self.0);
        *now += by;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}
