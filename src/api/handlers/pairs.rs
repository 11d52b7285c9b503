use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use crate::analysis::SpreadReport;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::SpreadParams;

pub async fn list_pairs(
    State(state): State<AppState>,
    params: Result<Query<SpreadParams>, QueryRejection>,
) -> Result<Json<SpreadReport>, ApiError> {
    let Query(params) = params?;
    super::run_pipeline(&state, &params).await.map(Json)
}
