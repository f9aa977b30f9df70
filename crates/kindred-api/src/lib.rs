//! Read-only JSON API for Kindred.
//!
//! Exposes an axum [`Router`] backed by any [`kindred_core::store::PersonStore`].
//! There are no write endpoints; the population is produced by
//! `kindred-generator`.
//!
//! # Mounting
//!
//! The router serves `/people` at the root, with no prefix:
//!
//! ```rust,ignore
//! axum::serve(listener, kindred_api::api_router(Arc::new(store))).await?;
//! ```

pub mod error;
pub mod people;

use std::sync::Arc;

use axum::{Router, routing::get};
use kindred_core::store::PersonStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PersonStore + 'static,
{
  Router::new()
    .route("/people", get(people::list::<S>))
    .route("/people/{id}", get(people::get_one::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}
