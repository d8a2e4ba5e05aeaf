/**
 * Body Extractors
 *
 * `ApiJson` and `ApiForm` wrap axum's `Json` and `Form`. A body that cannot
 * be decoded becomes a `400` with the usual `{error, status}` JSON body
 * instead of axum's plain-text rejection.
 */

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        FromRequest, Request,
    },
    http::StatusCode,
    Form, Json,
};

use crate::backend::error::BackendError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

/// `application/x-www-form-urlencoded` request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiForm<T>(pub T);

fn bad_body(kind: &str, detail: String) -> BackendError {
    tracing::debug!("[HTTP] Rejected {} body: {}", kind, detail);
    BackendError::handler(StatusCode::BAD_REQUEST, detail)
}

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(bad_body("JSON", rejection.body_text())),
        }
    }
}

impl<T, S> FromRequest<S> for ApiForm<T>
where
    Form<T>: FromRequest<S, Rejection = FormRejection>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(Self(value)),
            Err(rejection) => Err(bad_body("form", rejection.body_text())),
        }
    }
}
