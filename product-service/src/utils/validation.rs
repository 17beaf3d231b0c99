use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use validator::Validate;

/// JSON body extractor that runs `validator` rules before the handler sees
/// the value. Parse and validation failures both surface as 400 responses.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value.validate().map_err(|e| {
            tracing::debug!(error = %e, "Request body failed validation");
            AppError::from(e)
        })?;

        Ok(ValidatedJson(value))
    }
}
