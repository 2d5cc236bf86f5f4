use axum::{extract::State, routing::get, Json, Router};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::Identified,
    catalog::dto::DataResponse,
    error::ServiceError,
    state::AppState,
};

pub fn catalog_routes() -> Router<AppState> {
    Router::new().route("/data", get(get_data))
}

#[instrument(skip(state))]
pub async fn get_data(
    State(state): State<AppState>,
    Identified(login): Identified,
) -> Result<Json<DataResponse>, ServiceError> {
    let entries = state.catalog.list().await?;

    let touched = state
        .users
        .touch_last_request(&login, OffsetDateTime::now_utc())
        .await?;
    if !touched {
        warn!(%login, "identity cookie names no stored user");
    }

    info!(%login, total = entries.len(), "catalog served");
    Ok(Json(DataResponse::from(entries)))
}
