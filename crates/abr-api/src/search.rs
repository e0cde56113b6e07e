//! Handler for `GET /search`.

use std::sync::Arc;

use abr_client::Lookup;
use abr_core::{registry::Registry, search::NameSearchResult};
use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Entity or trading name to search for.
  #[serde(default)]
  pub name: String,
}

/// `GET /search?name=...`
pub async fn handler<R: Registry + 'static>(
  State(lookup): State<Arc<Lookup<R>>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<NameSearchResult>, ApiError> {
  Ok(Json(lookup.search_name(&params.name).await?))
}
