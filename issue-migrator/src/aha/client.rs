//! Aha! API v1 client.

use super::models::{
    AhaEpic, AhaFeature, EpicEnvelope, EpicReference, FeatureEnvelope, ReleaseEpicsPage,
};
use super::AhaError;
use crate::http::{api_base, build_client, check_status};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

const PER_PAGE: u32 = 100;

/// Aha! client using a bearer token.
#[derive(Debug, Clone)]
pub struct AhaClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl AhaClient {
    /// Creates a client for the account at `url`, e.g. `https://acme.aha.io`.
    ///
    /// # Errors
    ///
    /// Returns [`AhaError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &Url, token: impl Into<String>, verify_ssl: bool) -> Result<Self, AhaError> {
        Ok(Self {
            http: build_client(verify_ssl)?,
            base_url: api_base(url),
            token: token.into(),
        })
    }

    fn get(&self, url: Url) -> RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, AhaError> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    /// Lists the epics of a release, e.g. `PRJ-R-1`.
    ///
    /// # Errors
    ///
    /// Returns [`AhaError`] if any page request fails.
    pub async fn release_epics(&self, release: &str) -> Result<Vec<EpicReference>, AhaError> {
        let url = self
            .base_url
            .join(&format!("api/v1/releases/{release}/epics"))?;
        let mut epics = Vec::new();
        let mut page = 1u32;

        loop {
            let request = self
                .get(url.clone())
                .query(&[("page", page), ("per_page", PER_PAGE)]);
            let batch: ReleaseEpicsPage = Self::send(request).await?;
            debug!(release, page, count = batch.epics.len(), "Fetched release epics");
            epics.extend(batch.epics);

            match batch.pagination {
                Some(pagination) if pagination.current_page < pagination.total_pages => {
                    page = pagination.current_page + 1;
                }
                _ => break,
            }
        }

        Ok(epics)
    }

    /// Fetches an epic with its feature list.
    ///
    /// # Errors
    ///
    /// Returns [`AhaError`] if the request fails.
    pub async fn epic(&self, reference_num: &str) -> Result<AhaEpic, AhaError> {
        let url = self.base_url.join(&format!("api/v1/epics/{reference_num}"))?;
        let envelope: EpicEnvelope = Self::send(self.get(url)).await?;
        Ok(envelope.epic)
    }

    /// Fetches a feature by its API resource URL.
    ///
    /// # Errors
    ///
    /// Returns [`AhaError`] if the URL is invalid or the request fails.
    pub async fn feature(&self, resource: &str) -> Result<AhaFeature, AhaError> {
        let url = Url::parse(resource)?;
        let envelope: FeatureEnvelope = Self::send(self.get(url)).await?;
        Ok(envelope.feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> AhaClient {
        let url = Url::parse(&server.uri()).unwrap();
        AhaClient::new(&url, "aha-token", true).unwrap()
    }

    #[tokio::test]
    async fn release_epics_follows_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/releases/PRJ-R-1/epics"))
            .and(query_param("page", "1"))
            .and(bearer_token("aha-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "epics": [{"reference_num": "PRJ-E-1"}],
                "pagination": {"total_records": 2, "total_pages": 2, "current_page": 1}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/releases/PRJ-R-1/epics"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "epics": [{"reference_num": "PRJ-E-2"}],
                "pagination": {"total_records": 2, "total_pages": 2, "current_page": 2}
            })))
            .mount(&server)
            .await;

        let epics = client(&server).await.release_epics("PRJ-R-1").await.unwrap();

        let refs: Vec<_> = epics.iter().map(|epic| epic.reference_num.as_str()).collect();
        assert_eq!(refs, ["PRJ-E-1", "PRJ-E-2"]);
    }

    #[tokio::test]
    async fn epic_and_feature_are_unwrapped() {
        let server = MockServer::start().await;
        let feature_url = format!("{}/api/v1/features/PRJ-1", server.uri());
        Mock::given(method("GET"))
            .and(path("/api/v1/epics/PRJ-E-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "epic": {
                    "name": "Checkout",
                    "description": {"body": "<p>Pay</p>"},
                    "resource": "https://acme.aha.io/api/v1/epics/PRJ-E-1",
                    "release": {"name": "Q1"},
                    "features": [{"name": "Cart", "resource": feature_url}]
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/features/PRJ-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "feature": {"name": "Cart", "description": {"body": null}, "resource": "r"}
            })))
            .mount(&server)
            .await;

        let client = client(&server).await;
        let epic = client.epic("PRJ-E-1").await.unwrap();
        assert_eq!(epic.release.map(|release| release.name).as_deref(), Some("Q1"));

        let feature = client.feature(&epic.features[0].resource).await.unwrap();
        assert_eq!(feature.name, "Cart");
        assert_eq!(feature.description.body, None);
    }
}
