//! Bearer-credential identity extraction.
//!
//! [`AuthenticatedUser`] reads `Authorization: Bearer <token>`, hands the
//! token to the configured [`IdentityVerifier`](crate::domain::ports::IdentityVerifier)
//! and yields the verified [`UserId`]. Handlers never see the raw header.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error};

use super::state::HttpState;
use crate::domain::{Error, UserId};

const BEARER_SCHEME: &str = "bearer";

/// Identity of the caller, resolved from a verified bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// Verified user identifier.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<String, Error> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer credential"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() {
        return Err(Error::unauthorized("malformed authorization header"));
    }
    Ok(token.to_owned())
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let verifier = req
            .app_data::<web::Data<HttpState>>()
            .map(|state| state.identity.clone());
        let token = bearer_token(req.headers());
        Box::pin(async move {
            let Some(verifier) = verifier else {
                error!("identity verifier missing from application state");
                return Err(Error::internal("identity verifier not configured"));
            };
            let token = token?;
            verifier.verify(&token).await.map(Self).map_err(|err| {
                debug!(error = %err, "bearer credential rejected");
                Error::unauthorized("invalid bearer credential")
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        IdentityVerificationError, MockIdentityVerifier, MockUserProfileCommand,
        MockUserProfileQuery,
    };

    fn state(verifier: MockIdentityVerifier) -> HttpState {
        HttpState::new(
            Arc::new(MockUserProfileCommand::new()),
            Arc::new(MockUserProfileQuery::new()),
            Arc::new(verifier),
        )
    }

    fn accepting_verifier() -> MockIdentityVerifier {
        let mut verifier = MockIdentityVerifier::new();
        verifier.expect_verify().returning(|token| match token {
            "good-token" => Ok(UserId::new("user-1").expect("valid id")),
            _ => Err(IdentityVerificationError::rejected("signature mismatch")),
        });
        verifier
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id().to_string())
    }

    async fn call(authorization: Option<&str>) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(accepting_verifier())))
                .route("/", web::get().to(whoami)),
        )
        .await;
        let mut req = test::TestRequest::get().uri("/");
        if let Some(value) = authorization {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body = test::read_body(res).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[rstest]
    #[case("Bearer good-token")]
    #[case("bearer good-token")]
    #[case("BEARER   good-token  ")]
    #[actix_web::test]
    async fn accepts_valid_bearer_credentials(#[case] header: &str) {
        let (status, body) = call(Some(header)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "user-1");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("good-token"))]
    #[case(Some("Basic dXNlcjpwYXNz"))]
    #[case(Some("Bearer "))]
    #[case(Some("Bearer forged-token"))]
    #[actix_web::test]
    async fn rejects_missing_or_invalid_credentials(#[case] header: Option<&str>) {
        let (status, body) = call(header).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let payload: Error = serde_json::from_str(&body).expect("error payload");
        assert_eq!(payload.code(), crate::domain::ErrorCode::Unauthorized);
    }

    #[actix_web::test]
    async fn missing_state_is_an_internal_error() {
        let app = test::init_service(App::new().route("/", web::get().to(whoami))).await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((AUTHORIZATION, "Bearer good-token"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
