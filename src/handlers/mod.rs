/// HTTP request handlers
use crate::domain::{
    ApodRecord, EpicCollection, EpicDates, Health, ImageRecord, ManifestEnvelope, RoverName,
    RoverPhotos,
};
use crate::errors::{ApiError, ApiResult};
use crate::services::{ApodService, EpicService, MarsService};
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub apod_service: Arc<ApodService>,
    pub epic_service: Arc<EpicService>,
    pub mars_service: Arc<MarsService>,
}

/// Query string, with malformed input surfacing as a JSON 400
type Params = Result<Query<HashMap<String, String>>, QueryRejection>;

/// Non-blank query value
fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Astronomy Picture of the Day, optionally for `?date=`
pub async fn get_apod(
    params: Params,
    State(state): State<AppState>,
) -> ApiResult<Json<ApodRecord>> {
    let Query(params) = params?;
    let record = match param(&params, "date") {
        Some(date) => state.apod_service.for_date(date).await?,
        None => state.apod_service.today().await?,
    };
    Ok(Json(record))
}

pub async fn get_epic_dates(
    params: Params,
    State(state): State<AppState>,
) -> ApiResult<Json<EpicDates>> {
    let Query(params) = params?;
    let collection = EpicCollection::from_param(param(&params, "collection"))?;
    let dates = state.epic_service.available_dates(collection).await?;
    Ok(Json(EpicDates { dates }))
}

pub async fn get_epic_latest(
    params: Params,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ImageRecord>>> {
    let Query(params) = params?;
    let collection = EpicCollection::from_param(param(&params, "collection"))?;
    let images = state.epic_service.latest_images(collection).await?;
    Ok(Json(images))
}

/// EPIC images for `?date=`, or the latest day when no date is given
pub async fn get_epic(
    params: Params,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ImageRecord>>> {
    let Query(params) = params?;
    let collection = EpicCollection::from_param(param(&params, "collection"))?;
    let images = match param(&params, "date") {
        Some(date) => state.epic_service.images_for_date(collection, date).await?,
        None => state.epic_service.latest_images(collection).await?,
    };
    Ok(Json(images))
}

/// Rover photos for `?sol=`, or the latest photos when `sol` is absent or `latest`
pub async fn get_mars_photos(
    params: Params,
    State(state): State<AppState>,
) -> ApiResult<Json<RoverPhotos>> {
    let Query(params) = params?;
    let rover = param(&params, "rover")
        .ok_or_else(|| ApiError::InvalidParameter("A rover needs to be passed on".to_string()))
        .and_then(RoverName::parse)?;

    let body = match param(&params, "sol") {
        None => RoverPhotos::Latest {
            latest_photos: state.mars_service.latest_photos(&rover).await?,
        },
        Some(sol) if sol.eq_ignore_ascii_case("latest") => RoverPhotos::Latest {
            latest_photos: state.mars_service.latest_photos(&rover).await?,
        },
        Some(sol) => RoverPhotos::ForSol {
            photos: state
                .mars_service
                .photos_for_sol(&rover, sol, param(&params, "page"))
                .await?,
        },
    };
    Ok(Json(body))
}

pub async fn get_rover_manifest(
    rover: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> ApiResult<Json<ManifestEnvelope>> {
    let Path(rover) = rover?;
    let rover = RoverName::parse(&rover)?;
    let photo_manifest = state.mars_service.manifest(&rover).await?;
    Ok(Json(ManifestEnvelope { photo_manifest }))
}

/// `/rover-manifests/` with the rover segment left out
pub async fn missing_rover_manifest() -> ApiResult<Json<ManifestEnvelope>> {
    Err(ApiError::InvalidParameter(
        "A rover needs to be passed on".to_string(),
    ))
}
