use anyhow::Context;
use std::io::Write;
use tracing::{debug, warn};

use super::TruckFeed;
use crate::models::TrucksResponse;
use crate::query::TruckQuery;

/// [`TruckFeed`] over HTTP against a running truckmap service.
pub struct HttpTruckFeed {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpTruckFeed {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { http_client, base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    pub fn url_for(&self, query: &TruckQuery) -> String {
        format!("{}/trucks{}", self.base_url, query.to_query_string())
    }
}

impl TruckFeed for HttpTruckFeed {
    /// Error bodies are decoded whatever the HTTP status, since the service
    /// reports failures in the body.
    async fn fetch(&self, query: &TruckQuery) -> anyhow::Result<TrucksResponse> {
        let url = self.url_for(query);
        debug!("GET {}", url);
        let resp = self.http_client.get(&url).send().await.with_context(|| format!("request to {} failed", url))?;
        let status = resp.status();
        let body = resp
            .json::<TrucksResponse>()
            .await
            .with_context(|| format!("undecodable response from {} ({})", url, status))?;
        Ok(body)
    }
}

/// Writes one tab-separated line per matching truck and returns how many
/// were written. A service-reported error becomes an `Err`.
pub async fn print_trucks<F: TruckFeed, W: Write>(feed: &F, query: &TruckQuery, out: &mut W) -> anyhow::Result<usize> {
    match feed.fetch(query).await? {
        TrucksResponse::Trucks { resp } => {
            for truck in &resp {
                writeln!(
                    out,
                    "{}\t{},{}\t{}\t{}",
                    truck.name,
                    truck.latitude,
                    truck.longitude,
                    truck.address.as_deref().unwrap_or("-"),
                    truck.fooditems.as_deref().unwrap_or("-"),
                )?;
            }
            Ok(resp.len())
        }
        TrucksResponse::Error(body) => {
            warn!("service reported an error: {}", body.error);
            Err(anyhow::anyhow!(body.error))
        }
    }
}
