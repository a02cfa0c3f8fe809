//! User profile HTTP handlers.
//!
//! ```text
//! PUT    /api/v1/user
//! GET    /api/v1/user
//! DELETE /api/v1/user
//! GET    /api/v1/user/test
//! PUT    /api/v1/user/whatsapp                GET /api/v1/user/whatsapp
//! PUT    /api/v1/user/discord                 GET /api/v1/user/discord
//! PUT    /api/v1/user/telegram                GET /api/v1/user/telegram
//! PUT    /api/v1/user/notificationInterfaces  GET /api/v1/user/notificationInterfaces
//! PUT    /api/v1/user/webhooks                GET /api/v1/user/webhooks
//! PUT    /api/v1/user/fcmTokens               GET /api/v1/user/fcmTokens
//! DELETE /api/v1/user/fcmTokens
//! ```
//!
//! Every route resolves the caller through [`AuthenticatedUser`]; the user id
//! never comes from the body.

use actix_web::{HttpResponse, delete, get, put, web};

use crate::domain::{ProfileField, ProfileFieldValue};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::user_profile_dto::{
    DiscordIdRequest, DiscordIdResponse, FcmTokenRequest, FcmTokenResponse, FcmTokensResponse,
    MessageResponse, NotificationInterfacesRequest, NotificationInterfacesResponse,
    ProfileFieldResponse, TelegramNumberRequest, TelegramNumberResponse, UpsertResponse,
    UserProfileResponse, WebhooksRequest, WebhooksResponse, WhatsAppNumberRequest,
    WhatsAppNumberResponse,
};
use crate::inbound::http::validation::{
    DISCORD_ID, FCM_TOKEN, NOTIFICATION_INTERFACES, TELEGRAM_NUMBER, WEBHOOKS, WHATSAPP_NUMBER,
    parse_discord_id, parse_fcm_token, parse_notification_interfaces, parse_phone_number,
    parse_webhooks, require,
};

pub(crate) const USER_DELETED_MESSAGE: &str = "User deleted successfully";
pub(crate) const API_TEST_MESSAGE: &str = "API call test successful";

/// Register every profile route on `cfg`; mount under `/api/v1`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upsert_user)
        .service(get_user)
        .service(delete_user)
        .service(api_test)
        .service(edit_whatsapp_number)
        .service(get_whatsapp_number)
        .service(edit_discord_id)
        .service(get_discord_id)
        .service(edit_telegram_number)
        .service(get_telegram_number)
        .service(edit_notification_interfaces)
        .service(get_notification_interfaces)
        .service(edit_webhooks)
        .service(get_webhooks)
        .service(add_fcm_token)
        .service(delete_fcm_token)
        .service(get_fcm_tokens);
}

async fn edit(
    state: &HttpState,
    user: &AuthenticatedUser,
    value: ProfileFieldValue,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    let stored = state.profiles.edit_field(user.user_id(), value).await?;
    Ok(web::Json(stored.into()))
}

async fn read(
    state: &HttpState,
    user: &AuthenticatedUser,
    field: ProfileField,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    let value = state
        .profiles_query
        .fetch_field(user.user_id(), field)
        .await?;
    Ok(web::Json(value.into()))
}

/// Create the caller's profile if it does not exist yet.
///
/// The first successful call publishes the welcome event.
#[utoipa::path(
    put,
    path = "/api/v1/user",
    responses(
        (status = 201, description = "Profile created", body = UpsertResponse),
        (status = 200, description = "Profile already existed", body = UpsertResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (
            status = 500,
            description = "Store or queue failure; see details.profileCreated",
            body = ErrorSchema
        )
    ),
    tags = ["user"],
    operation_id = "upsertUser"
)]
#[put("/user")]
pub async fn upsert_user(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let outcome = state.profiles.upsert_user(user.user_id()).await?;
    let body = UpsertResponse {
        is_upserted: outcome.created,
    };
    Ok(if outcome.created {
        HttpResponse::Created().json(body)
    } else {
        HttpResponse::Ok().json(body)
    })
}

/// Fetch the caller's full profile.
#[utoipa::path(
    get,
    path = "/api/v1/user",
    responses(
        (status = 200, description = "Profile", body = UserProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "getUser"
)]
#[get("/user")]
pub async fn get_user(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UserProfileResponse>> {
    let profile = state.profiles_query.fetch_profile(user.user_id()).await?;
    Ok(web::Json(profile.into()))
}

/// Delete the caller's profile. Succeeds when there is nothing to delete.
#[utoipa::path(
    delete,
    path = "/api/v1/user",
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "deleteUser"
)]
#[delete("/user")]
pub async fn delete_user(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.profiles.delete_user(user.user_id()).await?;
    Ok(web::Json(MessageResponse::new(USER_DELETED_MESSAGE)))
}

/// Authenticated liveness check for clients.
#[utoipa::path(
    get,
    path = "/api/v1/user/test",
    responses(
        (status = 200, description = "Credential accepted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "apiTest"
)]
#[get("/user/test")]
pub async fn api_test(_user: AuthenticatedUser) -> web::Json<MessageResponse> {
    web::Json(MessageResponse::new(API_TEST_MESSAGE))
}

/// Replace the WhatsApp number.
#[utoipa::path(
    put,
    path = "/api/v1/user/whatsapp",
    request_body = WhatsAppNumberRequest,
    responses(
        (status = 200, description = "Stored value", body = WhatsAppNumberResponse),
        (status = 400, description = "Not an E.164 number", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "editWhatsAppNumber"
)]
#[put("/user/whatsapp")]
pub async fn edit_whatsapp_number(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<WhatsAppNumberRequest>,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    let raw = require(payload.into_inner().whats_app_number, WHATSAPP_NUMBER)?;
    let number = parse_phone_number(raw, WHATSAPP_NUMBER)?;
    edit(&state, &user, ProfileFieldValue::WhatsAppNumber(number)).await
}

/// Read the WhatsApp number.
#[utoipa::path(
    get,
    path = "/api/v1/user/whatsapp",
    responses(
        (status = 200, description = "Stored value", body = WhatsAppNumberResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "getWhatsAppNumber"
)]
#[get("/user/whatsapp")]
pub async fn get_whatsapp_number(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    read(&state, &user, ProfileField::WhatsAppNumber).await
}

/// Replace the Discord identifier.
#[utoipa::path(
    put,
    path = "/api/v1/user/discord",
    request_body = DiscordIdRequest,
    responses(
        (status = 200, description = "Stored value", body = DiscordIdResponse),
        (status = 400, description = "Missing member", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "editDiscordId"
)]
#[put("/user/discord")]
pub async fn edit_discord_id(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<DiscordIdRequest>,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    let raw = require(payload.into_inner().discord_id, DISCORD_ID)?;
    edit(&state, &user, ProfileFieldValue::DiscordId(parse_discord_id(raw))).await
}

/// Read the Discord identifier.
#[utoipa::path(
    get,
    path = "/api/v1/user/discord",
    responses(
        (status = 200, description = "Stored value", body = DiscordIdResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "getDiscordId"
)]
#[get("/user/discord")]
pub async fn get_discord_id(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    read(&state, &user, ProfileField::DiscordId).await
}

/// Replace the Telegram number.
#[utoipa::path(
    put,
    path = "/api/v1/user/telegram",
    request_body = TelegramNumberRequest,
    responses(
        (status = 200, description = "Stored value", body = TelegramNumberResponse),
        (status = 400, description = "Not an E.164 number", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "editTelegramNumber"
)]
#[put("/user/telegram")]
pub async fn edit_telegram_number(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<TelegramNumberRequest>,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    let raw = require(payload.into_inner().telegram_number, TELEGRAM_NUMBER)?;
    let number = parse_phone_number(raw, TELEGRAM_NUMBER)?;
    edit(&state, &user, ProfileFieldValue::TelegramNumber(number)).await
}

/// Read the Telegram number.
#[utoipa::path(
    get,
    path = "/api/v1/user/telegram",
    responses(
        (status = 200, description = "Stored value", body = TelegramNumberResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "getTelegramNumber"
)]
#[get("/user/telegram")]
pub async fn get_telegram_number(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    read(&state, &user, ProfileField::TelegramNumber).await
}

/// Replace the set of notification interfaces.
#[utoipa::path(
    put,
    path = "/api/v1/user/notificationInterfaces",
    request_body = NotificationInterfacesRequest,
    responses(
        (status = 200, description = "Stored set", body = NotificationInterfacesResponse),
        (status = 400, description = "Unknown interface", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "editNotificationInterfaces"
)]
#[put("/user/notificationInterfaces")]
pub async fn edit_notification_interfaces(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<NotificationInterfacesRequest>,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    let raw = require(
        payload.into_inner().notification_interfaces,
        NOTIFICATION_INTERFACES,
    )?;
    let interfaces = parse_notification_interfaces(raw)?;
    edit(
        &state,
        &user,
        ProfileFieldValue::NotificationInterfaces(interfaces),
    )
    .await
}

/// Read the set of notification interfaces.
#[utoipa::path(
    get,
    path = "/api/v1/user/notificationInterfaces",
    responses(
        (status = 200, description = "Stored set", body = NotificationInterfacesResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "getNotificationInterfaces"
)]
#[get("/user/notificationInterfaces")]
pub async fn get_notification_interfaces(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    read(&state, &user, ProfileField::NotificationInterfaces).await
}

/// Replace the webhook list after probing every URL.
#[utoipa::path(
    put,
    path = "/api/v1/user/webhooks",
    request_body = WebhooksRequest,
    responses(
        (status = 200, description = "Stored list", body = WebhooksResponse),
        (status = 400, description = "Malformed or unreachable URL", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "editWebhooks"
)]
#[put("/user/webhooks")]
pub async fn edit_webhooks(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<WebhooksRequest>,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    let raw = require(payload.into_inner().webhooks, WEBHOOKS)?;
    let urls = parse_webhooks(raw)?;
    edit(&state, &user, ProfileFieldValue::Webhooks(urls)).await
}

/// Read the webhook list.
#[utoipa::path(
    get,
    path = "/api/v1/user/webhooks",
    responses(
        (status = 200, description = "Stored list", body = WebhooksResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "getWebhooks"
)]
#[get("/user/webhooks")]
pub async fn get_webhooks(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    read(&state, &user, ProfileField::Webhooks).await
}

/// Append a push token.
#[utoipa::path(
    put,
    path = "/api/v1/user/fcmTokens",
    request_body = FcmTokenRequest,
    responses(
        (status = 200, description = "Token added", body = FcmTokenResponse),
        (status = 400, description = "Blank token", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "addFcmToken"
)]
#[put("/user/fcmTokens")]
pub async fn add_fcm_token(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<FcmTokenRequest>,
) -> ApiResult<web::Json<FcmTokenResponse>> {
    let raw = require(payload.into_inner().fcm_token, FCM_TOKEN)?;
    let token = parse_fcm_token(raw)?;
    let added = state.profiles.add_fcm_token(user.user_id(), token).await?;
    Ok(web::Json(FcmTokenResponse {
        fcm_token: added.into(),
    }))
}

/// Remove every occurrence of a push token.
#[utoipa::path(
    delete,
    path = "/api/v1/user/fcmTokens",
    request_body = FcmTokenRequest,
    responses(
        (status = 200, description = "Token removed", body = FcmTokenResponse),
        (status = 400, description = "Blank token", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "deleteFcmToken"
)]
#[delete("/user/fcmTokens")]
pub async fn delete_fcm_token(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<FcmTokenRequest>,
) -> ApiResult<web::Json<FcmTokenResponse>> {
    let raw = require(payload.into_inner().fcm_token, FCM_TOKEN)?;
    let token = parse_fcm_token(raw)?;
    let removed = state
        .profiles
        .delete_fcm_token(user.user_id(), token)
        .await?;
    Ok(web::Json(FcmTokenResponse {
        fcm_token: removed.into(),
    }))
}

/// Read the push tokens.
#[utoipa::path(
    get,
    path = "/api/v1/user/fcmTokens",
    responses(
        (status = 200, description = "Stored tokens", body = FcmTokensResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No profile", body = ErrorSchema)
    ),
    tags = ["user"],
    operation_id = "getFcmTokens"
)]
#[get("/user/fcmTokens")]
pub async fn get_fcm_tokens(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProfileFieldResponse>> {
    read(&state, &user, ProfileField::FcmTokens).await
}

#[cfg(test)]
mod tests;
