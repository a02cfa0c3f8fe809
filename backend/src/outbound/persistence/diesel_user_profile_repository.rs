//! PostgreSQL-backed `UserProfileRepository` using Diesel.
//!
//! Every statement touches only the columns it names, and each call is
//! bounded by the configured operation timeout.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::define_sql_function;
use diesel::prelude::*;
use diesel::sql_types::{Array, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserProfileRepository, UserProfileRepositoryError};
use crate::domain::{
    DiscordId, FcmToken, NotificationInterfaces, PhoneNumber, ProfileField, ProfileFieldValue,
    UserId, UserProfile, WebhookUrl,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, with_deadline};
use super::models::{NewUserProfileRow, UserProfileFieldUpdate, UserProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::user_profiles;

define_sql_function! {
    /// PostgreSQL `array_append`.
    fn array_append(array: Array<Text>, element: Text) -> Array<Text>;
}

define_sql_function! {
    /// PostgreSQL `array_remove`; drops every matching element.
    fn array_remove(array: Array<Text>, element: Text) -> Array<Text>;
}

/// Diesel implementation of [`UserProfileRepository`].
#[derive(Clone)]
pub struct DieselUserProfileRepository {
    pool: DbPool,
    operation_timeout: Duration,
}

impl DieselUserProfileRepository {
    /// Create a repository whose calls each time out after
    /// `operation_timeout`.
    pub fn new(pool: DbPool, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }

    async fn bounded<T, F>(
        &self,
        operation: &'static str,
        work: F,
    ) -> Result<T, UserProfileRepositoryError>
    where
        F: Future<Output = Result<T, UserProfileRepositoryError>>,
    {
        with_deadline(self.operation_timeout, work, || {
            UserProfileRepositoryError::timeout(operation)
        })
        .await
    }
}

fn pool_error(error: PoolError) -> UserProfileRepositoryError {
    map_pool_error(error, UserProfileRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserProfileRepositoryError {
    map_diesel_error(
        error,
        UserProfileRepositoryError::query,
        UserProfileRepositoryError::connection,
    )
}

fn corrupt(
    user_id: &str,
    column: &'static str,
    detail: impl std::fmt::Display,
) -> UserProfileRepositoryError {
    tracing::warn!(user_id, column, %detail, "stored profile value failed validation");
    UserProfileRepositoryError::query(format!("stored {column} is invalid"))
}

fn strings<T: Into<String> + Clone>(values: &[T]) -> Vec<String> {
    values.iter().cloned().map(Into::into).collect()
}

fn phone(
    user_id: &str,
    column: &'static str,
    raw: String,
) -> Result<PhoneNumber, UserProfileRepositoryError> {
    PhoneNumber::new(raw).map_err(|err| corrupt(user_id, column, err))
}

fn interfaces(
    user_id: &str,
    raw: Vec<String>,
) -> Result<NotificationInterfaces, UserProfileRepositoryError> {
    NotificationInterfaces::parse(raw)
        .map_err(|err| corrupt(user_id, "notification_interfaces", err))
}

fn tokens(user_id: &str, raw: Vec<String>) -> Result<Vec<FcmToken>, UserProfileRepositoryError> {
    raw.into_iter()
        .map(|token| FcmToken::new(token).map_err(|err| corrupt(user_id, "fcm_tokens", err)))
        .collect()
}

fn webhooks(
    user_id: &str,
    raw: Vec<String>,
) -> Result<Vec<WebhookUrl>, UserProfileRepositoryError> {
    raw.into_iter()
        .map(|url| WebhookUrl::new(url).map_err(|err| corrupt(user_id, "webhooks", err)))
        .collect()
}

fn row_to_profile(row: UserProfileRow) -> Result<UserProfile, UserProfileRepositoryError> {
    let user_id = UserId::new(row.user_id.clone())
        .map_err(|err| corrupt(&row.user_id, "user_id", err))?;
    let id = row.user_id.as_str();
    Ok(UserProfile {
        notification_interfaces: interfaces(id, row.notification_interfaces)?,
        fcm_tokens: tokens(id, row.fcm_tokens)?,
        whatsapp_number: phone(id, "whatsapp_number", row.whatsapp_number)?,
        discord_id: DiscordId::new(row.discord_id),
        telegram_number: phone(id, "telegram_number", row.telegram_number)?,
        webhooks: webhooks(id, row.webhooks)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
        user_id,
    })
}

fn field_update(
    value: &ProfileFieldValue,
    updated_at: DateTime<Utc>,
) -> UserProfileFieldUpdate<'_> {
    let mut update = UserProfileFieldUpdate {
        updated_at: Some(updated_at),
        ..UserProfileFieldUpdate::default()
    };
    match value {
        ProfileFieldValue::WhatsAppNumber(v) => update.whatsapp_number = Some(v.as_str()),
        ProfileFieldValue::DiscordId(v) => update.discord_id = Some(v.as_str()),
        ProfileFieldValue::TelegramNumber(v) => update.telegram_number = Some(v.as_str()),
        ProfileFieldValue::NotificationInterfaces(v) => {
            update.notification_interfaces = Some(v.to_strings());
        }
        ProfileFieldValue::FcmTokens(v) => update.fcm_tokens = Some(strings(v)),
        ProfileFieldValue::Webhooks(v) => update.webhooks = Some(strings(v)),
    }
    update
}

#[async_trait]
impl UserProfileRepository for DieselUserProfileRepository {
    async fn insert_if_absent(
        &self,
        profile: &UserProfile,
    ) -> Result<bool, UserProfileRepositoryError> {
        self.bounded("insert", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let row = NewUserProfileRow {
                user_id: profile.user_id.as_str(),
                notification_interfaces: profile.notification_interfaces.to_strings(),
                fcm_tokens: strings(&profile.fcm_tokens),
                whatsapp_number: profile.whatsapp_number.as_str(),
                discord_id: profile.discord_id.as_str(),
                telegram_number: profile.telegram_number.as_str(),
                webhooks: strings(&profile.webhooks),
                created_at: profile.created_at,
                updated_at: profile.updated_at,
            };
            let inserted = diesel::insert_into(user_profiles::table)
                .values(&row)
                .on_conflict(user_profiles::user_id)
                .do_nothing()
                .execute(&mut conn)
                .await
                .map_err(diesel_error)?;
            Ok(inserted > 0)
        })
        .await
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        self.bounded("find", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let row = user_profiles::table
                .filter(user_profiles::user_id.eq(user_id.as_str()))
                .select(UserProfileRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn update_field(
        &self,
        user_id: &UserId,
        value: &ProfileFieldValue,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserProfileRepositoryError> {
        self.bounded("update", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let matched = diesel::update(
                user_profiles::table.filter(user_profiles::user_id.eq(user_id.as_str())),
            )
            .set(field_update(value, updated_at))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
            Ok(matched > 0)
        })
        .await
    }

    async fn read_field(
        &self,
        user_id: &UserId,
        field: ProfileField,
    ) -> Result<Option<ProfileFieldValue>, UserProfileRepositoryError> {
        self.bounded("read", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let id = user_id.as_str();
            let by_user = user_profiles::table.filter(user_profiles::user_id.eq(id));

            macro_rules! project {
                ($column:ident) => {
                    by_user
                        .select(user_profiles::$column)
                        .first(&mut conn)
                        .await
                        .optional()
                        .map_err(diesel_error)?
                };
            }

            let value = match field {
                ProfileField::WhatsAppNumber => project!(whatsapp_number).map(|raw| {
                    phone(id, "whatsapp_number", raw).map(ProfileFieldValue::WhatsAppNumber)
                }),
                ProfileField::DiscordId => project!(discord_id)
                    .map(|raw: String| Ok(ProfileFieldValue::DiscordId(DiscordId::new(raw)))),
                ProfileField::TelegramNumber => project!(telegram_number).map(|raw| {
                    phone(id, "telegram_number", raw).map(ProfileFieldValue::TelegramNumber)
                }),
                ProfileField::NotificationInterfaces => project!(notification_interfaces)
                    .map(|raw| interfaces(id, raw).map(ProfileFieldValue::NotificationInterfaces)),
                ProfileField::FcmTokens => project!(fcm_tokens)
                    .map(|raw| tokens(id, raw).map(ProfileFieldValue::FcmTokens)),
                ProfileField::Webhooks => project!(webhooks)
                    .map(|raw| webhooks(id, raw).map(ProfileFieldValue::Webhooks)),
            };
            value.transpose()
        })
        .await
    }

    async fn push_fcm_token(
        &self,
        user_id: &UserId,
        token: &FcmToken,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserProfileRepositoryError> {
        self.bounded("push token", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let matched = diesel::update(
                user_profiles::table.filter(user_profiles::user_id.eq(user_id.as_str())),
            )
            .set((
                user_profiles::fcm_tokens
                    .eq(array_append(user_profiles::fcm_tokens, token.as_str())),
                user_profiles::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
            Ok(matched > 0)
        })
        .await
    }

    async fn pull_fcm_token(
        &self,
        user_id: &UserId,
        token: &FcmToken,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserProfileRepositoryError> {
        self.bounded("pull token", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let matched = diesel::update(
                user_profiles::table.filter(user_profiles::user_id.eq(user_id.as_str())),
            )
            .set((
                user_profiles::fcm_tokens
                    .eq(array_remove(user_profiles::fcm_tokens, token.as_str())),
                user_profiles::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
            Ok(matched > 0)
        })
        .await
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, UserProfileRepositoryError> {
        self.bounded("delete", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let removed = diesel::delete(
                user_profiles::table.filter(user_profiles::user_id.eq(user_id.as_str())),
            )
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
            Ok(removed > 0)
        })
        .await
    }
}
