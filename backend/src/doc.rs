//! OpenAPI documentation.
//!
//! [`ApiDoc`] registers every profile endpoint, the health probes, the
//! adapter-layer schema wrappers for domain types and the bearer security
//! scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, NotificationInterfaceSchema};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HS256 token whose `sub` claim is the user id."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "User profile API",
        description = "Per-user notification preferences with a one-time welcome event."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::user_profile::upsert_user,
        crate::inbound::http::user_profile::get_user,
        crate::inbound::http::user_profile::delete_user,
        crate::inbound::http::user_profile::api_test,
        crate::inbound::http::user_profile::edit_whatsapp_number,
        crate::inbound::http::user_profile::get_whatsapp_number,
        crate::inbound::http::user_profile::edit_discord_id,
        crate::inbound::http::user_profile::get_discord_id,
        crate::inbound::http::user_profile::edit_telegram_number,
        crate::inbound::http::user_profile::get_telegram_number,
        crate::inbound::http::user_profile::edit_notification_interfaces,
        crate::inbound::http::user_profile::get_notification_interfaces,
        crate::inbound::http::user_profile::edit_webhooks,
        crate::inbound::http::user_profile::get_webhooks,
        crate::inbound::http::user_profile::add_fcm_token,
        crate::inbound::http::user_profile::delete_fcm_token,
        crate::inbound::http::user_profile::get_fcm_tokens,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema, NotificationInterfaceSchema)),
    tags(
        (name = "user", description = "The caller's profile"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
