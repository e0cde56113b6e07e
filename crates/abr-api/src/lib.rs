//! JSON API for register lookups.
//!
//! Exposes an axum [`Router`] backed by a [`Lookup`] over any
//! [`Registry`]. TLS and auth are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", abr_api::api_router(Arc::new(Lookup::new(registry))))
//! ```

pub mod error;
pub mod lookups;
pub mod search;

use std::sync::Arc;

use abr_client::Lookup;
use abr_core::registry::Registry;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build the API router for `lookup`.
pub fn api_router<R>(lookup: Arc<Lookup<R>>) -> Router<()>
where
  R: Registry + 'static,
{
  Router::new()
    .route("/abn/{number}", get(lookups::abn::<R>))
    .route("/abn/{number}/history", get(lookups::abn_history::<R>))
    .route("/acn/{number}", get(lookups::acn::<R>))
    .route("/acn/{number}/history", get(lookups::acn_history::<R>))
    .route("/search", get(search::handler::<R>))
    .layer(TraceLayer::new_for_http())
    .with_state(lookup)
}
