use crate::config::Config;
use crate::model::RawRecord;
use crate::page;

use anyhow::{Context, Result, bail};
use http::{Request, Uri, header};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

type HttpsClient =
    Client<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>, String>;

/// Everything one run needs from the league site.
#[derive(Debug, Clone, Default)]
pub struct FetchedSchedule {
    pub records: Vec<RawRecord>,
    /// Body text of the team page; the season label lives in here.
    pub page_text: String,
}

impl FetchedSchedule {
    /// Assembles a schedule from a team page and an optional grid payload,
    /// reading the page's table when the payload produced nothing.
    pub fn from_sources(html: &str, payload: Option<&str>) -> Self {
        let mut records = match payload {
            Some(text) => page::records_from_json(text).unwrap_or_else(|e| {
                tracing::warn!("Could not parse JSON response: {:#}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        if records.is_empty() {
            tracing::info!("Attempting DOM fallback");
            records = page::records_from_table(html);
        } else {
            tracing::info!("Captured {} game records from the schedule grid", records.len());
        }

        Self {
            records,
            page_text: page::page_text(html),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScheduleClient {
    client: HttpsClient,
}

impl ScheduleClient {
    pub fn new() -> Self {
        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        root_store.add_parsable_certificates(result.certs);

        if root_store.is_empty() {
            // Plain http still works; https requests will fail at handshake.
            tracing::warn!("No valid system certificates found.");
        }

        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(TokioExecutor::new()).build(https_connector);
        Self { client }
    }

    pub async fn get_text(&self, url: &str) -> Result<String> {
        let uri: Uri = url.parse().with_context(|| format!("Invalid URL {}", url))?;
        let request = Request::get(uri)
            .header(header::USER_AGENT, USER_AGENT)
            .body(String::new())?;

        let response = self
            .client
            .request(request)
            .await
            .with_context(|| format!("GET {}", url))?;
        let status = response.status();
        if !status.is_success() {
            bail!("GET {} returned {}", url, status);
        }

        let body = response.into_body().collect().await?.to_bytes();
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Loads the team page and, when configured, the schedule grid.
    pub async fn fetch(&self, config: &Config) -> Result<FetchedSchedule> {
        let Some(page_url) = config.team_page_url.as_deref() else {
            bail!("team_page_url is not configured");
        };

        tracing::info!("Navigating to {}", page_url);
        let html = self.get_text(page_url).await?;

        let payload = match config.schedule_url.as_deref() {
            Some(url) => match self.get_text(&resolve_url(page_url, url)).await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!("Schedule endpoint failed: {:#}", e);
                    None
                }
            },
            None => None,
        };

        Ok(FetchedSchedule::from_sources(&html, payload.as_deref()))
    }
}

/// Resolves a root-relative `url` (e.g. "/Schedule/GetTeamScheduleGrid?...")
/// against the origin of `base`. Anything else is returned unchanged.
pub fn resolve_url(base: &str, url: &str) -> String {
    if !url.starts_with('/') {
        return url.to_string();
    }
    match base.parse::<Uri>() {
        Ok(uri) => match (uri.scheme_str(), uri.authority()) {
            (Some(scheme), Some(authority)) => format!("{}://{}{}", scheme, authority, url),
            _ => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}

impl Default for ScheduleClient {
    fn default() -> Self {
        Self::new()
    }
}
