use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

/// Primitive page operations against the hosted notes service.
///
/// `fetch` answers `Ok(None)` for a page that does not exist; every other
/// failure is an error. `write` is an upsert of the full line list.
#[async_trait::async_trait]
pub trait PageStore: Send + Sync {
    async fn fetch(&self, project: &str, title: &str) -> Result<Option<Vec<String>>>;
    async fn write(&self, project: &str, title: &str, lines: &[String]) -> Result<()>;
    async fn query(&self, project: &str, text: &str) -> Result<Vec<String>>;
}

/// HTTP client for the Scrapbox (Cosense) REST API.
pub struct ScrapboxClient {
    api_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    lines: Vec<Line>,
    /// Scrapbox answers 200 with `persistent: false` for a title nobody saved yet.
    #[serde(default = "persistent_by_default")]
    persistent: bool,
}

#[derive(Debug, Deserialize)]
struct Line {
    text: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    pages: Vec<PageTitle>,
}

#[derive(Debug, Deserialize)]
struct PageTitle {
    title: String,
}

#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    title: &'a str,
    lines: &'a [String],
}

fn persistent_by_default() -> bool {
    true
}

/// `.` and `..` never survive as URL path segments.
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

impl ScrapboxClient {
    pub fn new(api_url: String, connect_sid: Option<&str>) -> Result<Self> {
        Self::with_builder(api_url, connect_sid, reqwest::Client::builder())
    }

    fn with_builder(
        api_url: String,
        connect_sid: Option<&str>,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(sid) = connect_sid {
            let mut cookie = HeaderValue::from_str(&format!("connect.sid={}", sid))
                .context("SCRAPBOX_CONNECT_SID is not a valid header value")?;
            cookie.set_sensitive(true);
            headers.insert(COOKIE, cookie);
        }

        let client = builder
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build `<api_url>/<segments...>` with each segment percent-encoded.
    ///
    /// URL normalization removes `.` and `..` segments in any spelling
    /// (`%2E` included), so such segments are refused rather than letting the
    /// request land on the parent path.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(dot) = segments.iter().find(|s| is_dot_segment(s)) {
            anyhow::bail!("\"{}\" cannot be addressed as a Scrapbox URL path segment", dot);
        }
        let mut url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid Scrapbox API URL: {}", self.api_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Scrapbox API URL cannot be a base: {}", self.api_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        anyhow::bail!("Scrapbox API error ({}): {}", status, error_text);
    }
}

#[async_trait::async_trait]
impl PageStore for ScrapboxClient {
    async fn fetch(&self, project: &str, title: &str) -> Result<Option<Vec<String>>> {
        let url = self.url(&["pages", project, title])?;
        log::debug!("Scrapbox: GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request to Scrapbox")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let page: PageResponse = Self::error_for_status(response)
            .await?
            .json()
            .await
            .context("Failed to parse Scrapbox page response")?;

        if !page.persistent {
            return Ok(None);
        }

        Ok(Some(page.lines.into_iter().map(|l| l.text).collect()))
    }

    async fn write(&self, project: &str, title: &str, lines: &[String]) -> Result<()> {
        let url = self.url(&["pages", project])?;
        log::debug!("Scrapbox: POST {} ({} lines)", url, lines.len());

        let response = self
            .client
            .post(url)
            .json(&WriteRequest { title, lines })
            .send()
            .await
            .context("Failed to send request to Scrapbox")?;

        Self::error_for_status(response).await?;
        Ok(())
    }

    async fn query(&self, project: &str, text: &str) -> Result<Vec<String>> {
        let url = self.url(&["pages", project, "search", "query"])?;
        log::debug!("Scrapbox: GET {} q={:?}", url, text);

        let response = self
            .client
            .get(url)
            .query(&[("q", text)])
            .send()
            .await
            .context("Failed to send request to Scrapbox")?;

        let result: SearchResponse = Self::error_for_status(response)
            .await?
            .json()
            .await
            .context("Failed to parse Scrapbox search response")?;

        Ok(result.pages.into_iter().map(|p| p.title).collect())
    }
}
