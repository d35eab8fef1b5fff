use crate::clients::{decode, UpstreamApi};
use crate::domain::{
    LatestPhotosEnvelope, Manifest, ManifestEnvelope, PhotoRecord, RoverName, SolPhotosEnvelope,
};
use crate::errors::{ApiError, ApiResult};
use std::sync::Arc;
use tracing::warn;

const MARS_API: &str = "/mars-photos/api/v1";

/// Mars Rover Photos service.
///
/// The manifest and the photo listings are fetched independently. Upstream
/// can update between two calls, so a manifest's `max_sol` may not match the
/// sol of the latest photos; callers combining both views must tolerate that.
pub struct MarsService {
    upstream: Arc<dyn UpstreamApi>,
}

impl MarsService {
    pub fn new(upstream: Arc<dyn UpstreamApi>) -> Self {
        Self { upstream }
    }

    /// Mission manifest: date range, sol range and per-sol photo counts
    pub async fn manifest(&self, rover: &RoverName) -> ApiResult<Manifest> {
        note_unknown(rover);
        let path = format!("{MARS_API}/manifests/{rover}");
        let raw = self.upstream.fetch(&path, &[]).await?;
        let envelope: ManifestEnvelope = decode(&path, raw)?;
        Ok(envelope.photo_manifest)
    }

    /// Photos from the most recent sol upstream has published
    pub async fn latest_photos(&self, rover: &RoverName) -> ApiResult<Vec<PhotoRecord>> {
        note_unknown(rover);
        let path = format!("{MARS_API}/rovers/{rover}/latest_photos");
        let raw = self.upstream.fetch(&path, &[]).await?;
        let envelope: LatestPhotosEnvelope = decode(&path, raw)?;
        Ok(envelope.latest_photos)
    }

    /// Photos taken on `sol`, optionally a single upstream `page` of them
    pub async fn photos_for_sol(
        &self,
        rover: &RoverName,
        sol: &str,
        page: Option<&str>,
    ) -> ApiResult<Vec<PhotoRecord>> {
        let sol = parse_digits(sol).ok_or_else(|| {
            ApiError::InvalidParameter(format!("sol must be a non-negative integer, got {sol:?}"))
        })?;

        let mut query = vec![("sol", sol.to_string())];
        if let Some(page) = page {
            query.push(("page", parse_page(page)?.to_string()));
        }

        note_unknown(rover);
        let path = format!("{MARS_API}/rovers/{rover}/photos");
        let raw = self.upstream.fetch(&path, &query).await?;
        let envelope: SolPhotosEnvelope = decode(&path, raw)?;
        Ok(envelope.photos)
    }
}

/// Plain decimal digits only; `u32::from_str` alone would also take a leading `+`.
fn parse_digits(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_page(raw: &str) -> ApiResult<u32> {
    match parse_digits(raw) {
        Some(page) if page > 0 => Ok(page),
        _ => Err(ApiError::InvalidParameter(format!(
            "page must be a positive integer, got {raw:?}"
        ))),
    }
}

// Upstream decides validity; unknown names are forwarded as-is.
fn note_unknown(rover: &RoverName) {
    if !rover.is_known() {
        warn!(%rover, "forwarding unrecognized rover name");
    }
}
