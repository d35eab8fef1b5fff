use crate::clients::{decode, UpstreamApi};
use crate::domain::{EpicCollection, EpicDate, ImageRecord};
use crate::errors::{ApiError, ApiResult};
use crate::utils::{build_archive_url, split_date, validate_date};
use std::sync::Arc;
use tracing::debug;

/// EPIC (Earth Polychromatic Imaging Camera) imagery service
pub struct EpicService {
    upstream: Arc<dyn UpstreamApi>,
}

impl EpicService {
    pub fn new(upstream: Arc<dyn UpstreamApi>) -> Self {
        Self { upstream }
    }

    /// All dates with imagery for `collection`, in upstream order
    pub async fn available_dates(&self, collection: EpicCollection) -> ApiResult<Vec<String>> {
        let path = format!("/EPIC/api/{collection}/all");
        let raw = self.upstream.fetch(&path, &[]).await?;
        let dates: Vec<EpicDate> = decode(&path, raw)?;
        Ok(dates.into_iter().map(|d| d.date).collect())
    }

    /// Images for the most recent date upstream lists.
    ///
    /// The listing is normally newest-first, but it is sorted here before
    /// the first entry is taken so a misordered listing still yields the
    /// newest day.
    pub async fn latest_images(&self, collection: EpicCollection) -> ApiResult<Vec<ImageRecord>> {
        let mut dates = self.available_dates(collection).await?;
        dates.sort_unstable_by(|a, b| b.cmp(a));

        let latest = dates
            .first()
            .ok_or_else(|| ApiError::NoDatesAvailable(collection.to_string()))?;
        let parts = split_date(latest)?;
        let day = format!("{}-{}-{}", parts.year, parts.month, parts.day);
        debug!(%collection, %day, "resolved latest EPIC date");

        self.fetch_images(collection, &day).await
    }

    /// Images captured on `date` (`YYYY-MM-DD`). A day without imagery yields an empty list.
    pub async fn images_for_date(
        &self,
        collection: EpicCollection,
        date: &str,
    ) -> ApiResult<Vec<ImageRecord>> {
        let date = validate_date(date)?;
        self.fetch_images(collection, &date.format("%Y-%m-%d").to_string())
            .await
    }

    async fn fetch_images(
        &self,
        collection: EpicCollection,
        day: &str,
    ) -> ApiResult<Vec<ImageRecord>> {
        let path = format!("/EPIC/api/{collection}/date/{day}");
        let raw = self.upstream.fetch(&path, &[]).await?;
        let records: Vec<ImageRecord> = decode(&path, raw)?;

        records
            .into_iter()
            .map(|record| with_archive_url(collection, record))
            .collect()
    }
}

/// The archive path is keyed on the capture date, which may differ from the
/// day that was requested.
fn with_archive_url(collection: EpicCollection, mut record: ImageRecord) -> ApiResult<ImageRecord> {
    let parts = split_date(&record.date)?;
    record.archive_url = build_archive_url(
        collection,
        &parts.year,
        &parts.month,
        &parts.day,
        &record.image,
    );
    record.collection = collection;
    Ok(record)
}
