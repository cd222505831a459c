// File: ./src/client/core.rs
use crate::client::api::ActivityApi;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{
    Activity, ActivitySummary, DateToken, Envelope, RawSlot, SlotPayload, Venue,
};

use async_trait::async_trait;
use http::header::{HeaderValue, ORIGIN};
use http::{Method, Request};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

type HttpsClient = Client<
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
    String,
>;

#[derive(Clone, Debug)]
pub struct BetterClient {
    http: HttpsClient,
    base_url: String,
    origin: HeaderValue,
}

impl BetterClient {
    pub fn new(base_url: &str, origin: &str) -> Result<Self> {
        let origin = HeaderValue::from_str(origin).map_err(|e| Error::Network {
            url: base_url.to_string(),
            reason: format!("invalid origin {origin:?}: {e}"),
        })?;

        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        root_store.add_parsable_certificates(result.certs);
        if root_store.is_empty() {
            // Plain http endpoints still work without roots
            warn!("no system certificates found; https requests will fail");
        }

        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http = Client::builder(TokioExecutor::new()).build(https_connector);

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            origin,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, &config.origin)
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str, what: &'static str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let network = |reason: String| Error::Network {
            url: url.clone(),
            reason,
        };

        let req = Request::builder()
            .method(Method::GET)
            .uri(&url)
            .header(ORIGIN, self.origin.clone())
            .body(String::new())
            .map_err(|e| network(e.to_string()))?;

        debug!(%url, "GET");
        let resp = self.http.request(req).await.map_err(|e| {
            warn!(%url, error = %e, "failed to load {what}");
            network(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%url, %status, "failed to load {what}");
            return Err(Error::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| network(e.to_string()))?
            .to_bytes();

        let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|e| {
            warn!(%url, error = %e, "failed to decode {what}");
            Error::decode(what, e)
        })?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ActivityApi for BetterClient {
    async fn venues(&self) -> Result<Vec<Venue>> {
        self.get_data("/api/activities/venues", "venues").await
    }

    async fn venue(&self, venue: &str) -> Result<Venue> {
        self.get_data(&format!("/api/activities/venues/{venue}"), "venue")
            .await
    }

    async fn categories(&self, venue: &str) -> Result<Vec<ActivitySummary>> {
        self.get_data(
            &format!("/api/activities/venue/{venue}/categories"),
            "activity categories",
        )
        .await
    }

    async fn activity(&self, venue: &str, activity: &str) -> Result<Activity> {
        self.get_data(
            &format!("/api/activities/venue/{venue}/categories/{activity}"),
            "activity",
        )
        .await
    }

    async fn dates(&self, venue: &str, activity: &str) -> Result<Vec<DateToken>> {
        self.get_data(
            &format!("/api/activities/venue/{venue}/activity-category/{activity}/dates"),
            "dates",
        )
        .await
    }

    async fn times(&self, venue: &str, activity: &str, date: &DateToken) -> Result<Vec<RawSlot>> {
        let payload: SlotPayload = self
            .get_data(
                &format!(
                    "/api/activities/venue/{venue}/activity/{activity}/times?date={}",
                    date.raw_id
                ),
                "times",
            )
            .await?;
        Ok(payload.into_slots())
    }
}
