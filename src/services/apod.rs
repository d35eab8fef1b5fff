use crate::clients::{decode, UpstreamApi};
use crate::domain::ApodRecord;
use crate::errors::ApiResult;
use crate::utils::validate_date;
use std::sync::Arc;

const APOD_PATH: &str = "/planetary/apod";

/// Astronomy Picture of the Day service
pub struct ApodService {
    upstream: Arc<dyn UpstreamApi>,
}

impl ApodService {
    pub fn new(upstream: Arc<dyn UpstreamApi>) -> Self {
        Self { upstream }
    }

    /// Today's entry as upstream defines "today" (US Eastern publishing day)
    pub async fn today(&self) -> ApiResult<ApodRecord> {
        self.fetch(Vec::new()).await
    }

    pub async fn for_date(&self, date: &str) -> ApiResult<ApodRecord> {
        let date = validate_date(date)?;
        self.fetch(vec![("date", date.format("%Y-%m-%d").to_string())])
            .await
    }

    async fn fetch(&self, mut query: Vec<(&str, String)>) -> ApiResult<ApodRecord> {
        // Video entries only carry a preview image when asked for one.
        query.push(("thumbs", "true".to_string()));
        let raw = self.upstream.fetch(APOD_PATH, &query).await?;
        decode(APOD_PATH, raw)
    }
}
