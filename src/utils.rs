/// Date and archive-path helpers for EPIC imagery
use crate::domain::EpicCollection;
use crate::errors::{ApiError, ApiResult};
use chrono::NaiveDate;

pub const EPIC_ARCHIVE_BASE: &str = "https://epic.gsfc.nasa.gov/archive";

/// Zero-padded components of a `YYYY-MM-DD` date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub year: String,
    pub month: String,
    pub day: String,
}

/// Split `"YYYY-MM-DD[ HH:MM:SS]"` into its date components.
/// Everything after the first space is ignored.
pub fn split_date(raw: &str) -> ApiResult<DateParts> {
    let date = raw.split(' ').next().unwrap_or_default();
    if !is_iso_date_shape(date) {
        return Err(ApiError::MalformedDate(raw.to_string()));
    }

    Ok(DateParts {
        year: date[0..4].to_string(),
        month: date[5..7].to_string(),
        day: date[8..10].to_string(),
    })
}

/// `<base>/<collection>/<year>/<month>/<day>/png/<image_id>.png`
pub fn build_archive_url(
    collection: EpicCollection,
    year: &str,
    month: &str,
    day: &str,
    image_id: &str,
) -> String {
    format!("{EPIC_ARCHIVE_BASE}/{collection}/{year}/{month}/{day}/png/{image_id}.png")
}

/// Check a caller-supplied date: strict `YYYY-MM-DD` and a real calendar day.
pub fn validate_date(raw: &str) -> ApiResult<NaiveDate> {
    let raw = raw.trim();
    if !is_iso_date_shape(raw) {
        return Err(ApiError::InvalidParameter(format!(
            "date must be YYYY-MM-DD, got {raw:?}"
        )));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::InvalidParameter(format!("{raw:?} is not a calendar date")))
}

fn is_iso_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}
