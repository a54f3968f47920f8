//! JSON body extractors whose rejections use the API error format.

use std::marker::PhantomData;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use eduhub_core::error::AppError;

/// Like [`axum::Json`], but a malformed body becomes a validation error.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// A JSON body that is buffered but only parsed on [`DeferredJson::parse`].
///
/// Protected handlers call `parse` only after the role check has passed.
#[derive(Debug, Clone)]
pub struct DeferredJson<T> {
    bytes: Bytes,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> DeferredJson<T> {
    /// Deserialize the buffered body.
    pub fn parse(&self) -> Result<T, AppError> {
        serde_json::from_slice(&self.bytes).map_err(|e| {
            AppError::validation(format!("Failed to parse the request body as JSON: {e}"))
        })
    }
}

impl<S, T> FromRequest<S> for DeferredJson<T>
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self {
            bytes,
            _marker: PhantomData,
        })
    }
}
