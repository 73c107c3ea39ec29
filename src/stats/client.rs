use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use super::{decode, RegionStatDetail, RegionStatSummary};
use crate::error::FetchError;

/// Read-only source of per-region statistics
pub trait StatsSource: Send + Sync + 'static {
    /// Summary entries for every region
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<RegionStatSummary>, FetchError>> + Send;

    /// Statistics of a single region, addressed by its display label
    fn fetch_region(&self, label: &str) -> impl Future<Output = Result<RegionStatDetail, FetchError>> + Send;
}

/// disease.sh style REST API: `{base}/states` and `{base}/states/{label}`
pub struct HttpStatsSource {
    client: Client,
    base: Url,
}

impl HttpStatsSource {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base = Url::parse(api_base).map_err(|e| FetchError::Url(format!("{api_base}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::Url(api_base.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Url(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T>(&self, url: Url) -> Result<T, FetchError>
    where
        T: for<'de> Deserialize<'de>,
    {
        debug!(%url, "fetching");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut body = response.bytes().await?.to_vec();
        Ok(decode(&mut body)?)
    }
}

impl StatsSource for HttpStatsSource {
    async fn fetch_all(&self) -> Result<Vec<RegionStatSummary>, FetchError> {
        let url = self.endpoint(&["states"])?;
        self.get_json(url).await
    }

    async fn fetch_region(&self, label: &str) -> Result<RegionStatDetail, FetchError> {
        let url = self.endpoint(&["states", label])?;
        self.get_json(url).await
    }
}
