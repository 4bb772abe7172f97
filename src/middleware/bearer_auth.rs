/// Bearer authentication
///
/// Handlers that act on behalf of a user take an [`AuthenticatedUser`]
/// argument. Extraction reads the `Authorization` header and runs it through
/// [`AuthGateway::authenticate`]; a request without a valid access token never
/// reaches the handler body.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use uuid::Uuid;

use crate::auth::AuthGateway;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let gateway = match req.app_data::<web::Data<AuthGateway>>() {
            Some(gateway) => gateway,
            None => {
                return ready(Err(AppError::Internal(
                    "auth gateway not registered".to_string(),
                )))
            }
        };

        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let result = gateway.authenticate(authorization).map(|user_id| {
            tracing::debug!(user_id = %user_id, "Request authenticated");
            AuthenticatedUser { user_id }
        });
        ready(result)
    }
}
