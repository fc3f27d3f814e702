//! Carousel collections.

use shopfront_storefront::{AppError, AppState};

use crate::render;

/// Render collection `name`.
///
/// # Errors
///
/// Returns `AppError::UnknownCollection` if `name` is not configured.
pub async fn show(state: &AppState, name: &str) -> Result<String, AppError> {
    let products = state.collections().load(name).await?;
    Ok(render::collection(name, &products))
}

/// Render the configured collection names.
pub fn list(state: &AppState) -> String {
    render::collection_names(state.collections().names())
}
