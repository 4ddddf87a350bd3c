use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use error_stack::Report;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use kernel::{FieldViolation, KernelError, Violations};

use crate::error::ErrorStatus;
use crate::handler::AppModule;

/// Set by the authentication proxy in front of this service.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ErrorStatus;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .map(CurrentUser)
            .ok_or_else(|| {
                Report::new(KernelError::Unauthorized)
                    .attach_printable(format!("missing or malformed {USER_ID_HEADER} header"))
                    .into()
            })
    }
}

/// Passes only when the bearer token equals the configured admin token.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

#[async_trait]
impl FromRequestParts<AppModule> for AdminGuard {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppModule,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    Report::new(KernelError::Unauthorized).attach_printable(rejection.to_string())
                })?;
        match state.admin_token() {
            Some(token) if token_matches(token, bearer.token()) => Ok(AdminGuard),
            Some(_) => Err(Report::new(KernelError::Unauthorized)
                .attach_printable("admin token mismatch")
                .into()),
            None => Err(Report::new(KernelError::Unauthorized)
                .attach_printable("admin panel is disabled")
                .into()),
        }
    }
}

/// Runs in time independent of where the tokens first differ.
fn token_matches(expected: &str, given: &str) -> bool {
    constant_time_eq::constant_time_eq(expected.as_bytes(), given.as_bytes())
}

/// JSON body checked for shape only. Field rules belong to the services,
/// which report every bad field of a form at once.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ErrorStatus;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| FieldViolation::new("body", rejection.body_text()).into_report())?;
        Ok(Self(value))
    }
}

/// Query string counterpart of [`JsonBody`].
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ErrorStatus;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| FieldViolation::new("query", rejection.body_text()).into_report())?;
        Ok(Self(value))
    }
}

/// Query parameters with `validator` rules of their own, such as paging limits.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ErrorStatus;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let QueryParams(value) = QueryParams::<T>::from_request_parts(parts, state).await?;
        value.validate().map_err(into_report)?;
        Ok(Self(value))
    }
}

pub(crate) fn into_report(errors: ValidationErrors) -> Report<KernelError> {
    let mut fields = errors.field_errors().into_iter().collect::<Vec<_>>();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));
    let mut violations = Violations::default();
    for (field, errors) in fields {
        for error in errors {
            let message = error
                .message
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| error.code.to_string());
            violations.push(FieldViolation::new(field.clone(), message));
        }
    }
    violations.into_report()
}
