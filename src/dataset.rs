use anyhow::Context;
use tracing::{debug, warn};

use crate::dataset_cache::DatasetCache;
use crate::models::PermitRecord;

/// Pulls the permit dataset from upstream, going through the cache when one
/// is configured.
pub struct DatasetClient {
    http_client: reqwest::Client,
    url: String,
    cache: Option<DatasetCache>,
}

impl DatasetClient {
    pub fn new(http_client: reqwest::Client, url: impl Into<String>, cache: Option<DatasetCache>) -> Self {
        Self { http_client, url: url.into(), cache }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_permits(&self) -> anyhow::Result<Vec<PermitRecord>> {
        if let Some(cache) = &self.cache {
            match cache.get(&self.url).await {
                Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                    Ok(permits) => return Ok(permits),
                    Err(e) => warn!("discarding unreadable cached dataset: {}", e),
                },
                Ok(None) => {}
                Err(e) => warn!("dataset cache lookup failed: {}", e),
            }
        }

        let resp = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("unable to open the dataset URL {}", self.url))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("dataset URL {} returned {}", self.url, status));
        }
        let bytes = resp.bytes().await?;
        let permits: Vec<PermitRecord> = serde_json::from_slice(&bytes)
            .with_context(|| format!("dataset at {} is not a permit list", self.url))?;
        debug!("fetched {} permits from {}", permits.len(), self.url);

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.insert(&self.url, &bytes).await {
                warn!("failed to cache dataset: {}", e);
            }
        }
        Ok(permits)
    }
}
