//! Handlers for `GET /abn/{number}` and `GET /acn/{number}`, plus their
//! `/history` forms.

use std::sync::Arc;

use abr_client::Lookup;
use abr_core::{lookup::LookupResult, registry::Registry};
use axum::{
  Json,
  extract::{Path, State},
  response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// `GET /abn/{number}`
pub async fn abn<R: Registry + 'static>(
  State(lookup): State<Arc<Lookup<R>>>,
  Path(number): Path<String>,
) -> Result<Json<LookupResult>, ApiError> {
  Ok(Json(lookup.lookup_abn(&number).await?))
}

/// `GET /acn/{number}`
pub async fn acn<R: Registry + 'static>(
  State(lookup): State<Arc<Lookup<R>>>,
  Path(number): Path<String>,
) -> Result<Json<LookupResult>, ApiError> {
  Ok(Json(lookup.lookup_asic(&number).await?))
}

/// `GET /abn/{number}/history`
pub async fn abn_history<R: Registry + 'static>(
  State(lookup): State<Arc<Lookup<R>>>,
  Path(number): Path<String>,
) -> Result<Response, ApiError> {
  let result = lookup.lookup_abn(&number).await?;
  Ok(Json(result.history()).into_response())
}

/// `GET /acn/{number}/history`
pub async fn acn_history<R: Registry + 'static>(
  State(lookup): State<Arc<Lookup<R>>>,
  Path(number): Path<String>,
) -> Result<Response, ApiError> {
  let result = lookup.lookup_asic(&number).await?;
  Ok(Json(result.history()).into_response())
}
