pub mod form;
pub mod pairs;

use crate::analysis::{self, SpreadReport};
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::SpreadParams;
use crate::fetch_data;

/// Rerun the whole pipeline with the submitted parameters.
pub(crate) async fn run_pipeline(
    state: &AppState,
    params: &SpreadParams,
) -> Result<SpreadReport, ApiError> {
    let inner = &state.inner;
    let mut settings = inner.settings.clone();
    settings.spread = params.apply(settings.spread);
    settings.spread.validate()?;

    let rows = fetch_data::load_market(
        &inner.client,
        &settings,
        &inner.input,
        inner.prices.as_ref(),
        false,
    )
    .await
    .map_err(|e| ApiError::Upstream(format!("{e:#}")))?;

    Ok(analysis::analyze(&rows, &settings.spread))
}
