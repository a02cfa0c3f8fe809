//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; adapters convert them to domain
//! types at the boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::user_profiles;

/// Full `user_profiles` row minus the surrogate key.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserProfileRow {
    pub user_id: String,
    pub notification_interfaces: Vec<String>,
    pub fcm_tokens: Vec<String>,
    pub whatsapp_number: String,
    pub discord_id: String,
    pub telegram_number: String,
    pub webhooks: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable profile.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_profiles)]
pub(crate) struct NewUserProfileRow<'a> {
    pub user_id: &'a str,
    pub notification_interfaces: Vec<String>,
    pub fcm_tokens: Vec<String>,
    pub whatsapp_number: &'a str,
    pub discord_id: &'a str,
    pub telegram_number: &'a str,
    pub webhooks: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update: `None` columns are left out of the `SET` clause.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = user_profiles)]
pub(crate) struct UserProfileFieldUpdate<'a> {
    pub notification_interfaces: Option<Vec<String>>,
    pub fcm_tokens: Option<Vec<String>>,
    pub whatsapp_number: Option<&'a str>,
    pub discord_id: Option<&'a str>,
    pub telegram_number: Option<&'a str>,
    pub webhooks: Option<Vec<String>>,
    pub updated_at: Option<DateTime<Utc>>,
}

