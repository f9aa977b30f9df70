//! Handlers for `/people` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/people` | Whole population, store order |
//! | `GET`  | `/people/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use kindred_core::{
  person::PersonId,
  relation::PersonView,
  store::PersonStore,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /people`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<PersonView>>, ApiError>
where
  S: PersonStore,
{
  let people = store.list_views().await.map_err(ApiError::store)?;
  Ok(Json(people))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /people/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<PersonView>, ApiError>
where
  S: PersonStore,
{
  let id: PersonId = raw_id
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("invalid person id {raw_id:?}")))?;

  let person = store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;

  let view = store.view(person).await.map_err(ApiError::store)?;
  Ok(Json(view))
}
