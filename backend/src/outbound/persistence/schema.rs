//! Diesel table definitions.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after schema changes.

diesel::table! {
    /// One notification profile per user.
    user_profiles (id) {
        /// Surrogate key.
        id -> Int8,
        /// External identity; unique.
        user_id -> Text,
        /// Lowercase channel names.
        notification_interfaces -> Array<Text>,
        /// Device push tokens in insertion order.
        fcm_tokens -> Array<Text>,
        /// E.164 number or empty.
        whatsapp_number -> Text,
        /// Free-form identifier or empty.
        discord_id -> Text,
        /// E.164 number or empty.
        telegram_number -> Text,
        /// Callback URLs.
        webhooks -> Array<Text>,
        /// First upsert time.
        created_at -> Timestamptz,
        /// Last mutation time.
        updated_at -> Timestamptz,
    }
}

