/// Domain models for the application
use crate::errors::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// EPIC image collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpicCollection {
    #[default]
    Natural,
    Enhanced,
}

impl EpicCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpicCollection::Natural => "natural",
            EpicCollection::Enhanced => "enhanced",
        }
    }

    /// Parse an optional query value; absent or blank means `natural`.
    pub fn from_param(raw: Option<&str>) -> ApiResult<Self> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(s) if s.eq_ignore_ascii_case("natural") => Ok(EpicCollection::Natural),
            Some(s) if s.eq_ignore_ascii_case("enhanced") => Ok(EpicCollection::Enhanced),
            Some(s) => Err(ApiError::InvalidParameter(format!(
                "unknown EPIC collection {s:?}, expected natural or enhanced"
            ))),
        }
    }
}

impl fmt::Display for EpicCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the EPIC `/all` date listing
#[derive(Debug, Clone, Deserialize)]
pub struct EpicDate {
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quaternion {
    pub q0: f64,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

/// EPIC image metadata, enriched with the archive URL of the PNG
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub identifier: String,
    #[serde(default)]
    pub caption: String,
    /// Raw image name, e.g. `epic_1b_20230615001751`
    pub image: String,
    /// Capture timestamp, `YYYY-MM-DD HH:MM:SS`
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid_coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dscovr_j2000_position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunar_j2000_position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun_j2000_position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attitude_quaternions: Option<Quaternion>,
    #[serde(default)]
    pub collection: EpicCollection,
    #[serde(rename = "archiveUrl", default)]
    pub archive_url: String,
    /// Upstream fields not modelled above, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct EpicDates {
    pub dates: Vec<String>,
}

/// Mars rover name as supplied by the caller, always lower-cased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoverName(String);

impl RoverName {
    pub const KNOWN: [&'static str; 4] = ["curiosity", "opportunity", "spirit", "perseverance"];

    pub fn parse(raw: &str) -> ApiResult<Self> {
        let name = raw.trim().to_ascii_lowercase();
        if name.is_empty() {
            return Err(ApiError::InvalidParameter(
                "A rover needs to be passed on".to_string(),
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ApiError::InvalidParameter(format!(
                "invalid rover name {raw:?}"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }
}

impl fmt::Display for RoverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoverStatus {
    Active,
    Complete,
}

/// Photo count for a single sol of a rover manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolSummary {
    pub sol: u32,
    pub earth_date: String,
    pub total_photos: u64,
    #[serde(default)]
    pub cameras: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub launch_date: String,
    pub landing_date: String,
    pub status: RoverStatus,
    pub max_sol: u32,
    pub max_date: String,
    pub total_photos: u64,
    #[serde(default)]
    pub photos: Vec<SolSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEnvelope {
    pub photo_manifest: Manifest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub full_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Mars rover photo; `img_src` is already absolute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sol: Option<u32>,
    #[serde(rename = "img_src")]
    pub image_url: String,
    pub earth_date: String,
    pub camera: Camera,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct LatestPhotosEnvelope {
    pub latest_photos: Vec<PhotoRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SolPhotosEnvelope {
    pub photos: Vec<PhotoRecord>,
}

/// Body of `/mars-photos`, shaped like the upstream endpoint that served it
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RoverPhotos {
    Latest { latest_photos: Vec<PhotoRecord> },
    ForSol { photos: Vec<PhotoRecord> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// Astronomy Picture of the Day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApodRecord {
    pub title: String,
    pub date: String,
    pub url: String,
    #[serde(default)]
    pub explanation: String,
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_version: Option<String>,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
