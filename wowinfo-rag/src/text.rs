//! Text utilities: cleaning, chunking, URL validation, URL fetching.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::warn;
use url::Url;

/// Default timeout for URL content fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("unreachable error: invalid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("unreachable error: invalid regex"));

/// Normalize text: strip all non-alphanumeric, non-whitespace characters,
/// then collapse whitespace runs to a single space and trim.
///
/// This is lossy — punctuation used for sentence boundaries is destroyed.
/// The operation is idempotent.
pub fn clean_text(text: &str) -> String {
    let stripped = NON_WORD_RE.replace_all(text, "");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

/// Split text into windows of `chunk_size` characters, consecutive windows
/// sharing `overlap` characters. Text that already fits in one chunk is
/// returned unchanged as a single-element vector.
///
/// Requires `overlap < chunk_size`; with `overlap >= chunk_size` the
/// window cannot advance and only the first chunk is produced. Windows
/// are measured in chars, so multi-byte text never splits mid-character.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let step = chunk_size.saturating_sub(overlap);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() || step == 0 {
            break;
        }
        start += step;
    }

    chunks
}

/// A URL is valid iff it parses with both a scheme and a host.
/// Malformed input yields `false`, never an error.
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).map(|u| u.has_host()).unwrap_or(false)
}

/// Fetches URL content with redirect-following and a bounded timeout.
///
/// Fetch failures are logged and reported as `None` — they never
/// propagate as errors.
pub struct UrlFetcher {
    http: reqwest::Client,
}

impl UrlFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        // reqwest follows up to 10 redirects by default
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("all parameters must be valid");
        Self { http }
    }

    /// Fetch the body text of a URL, or `None` on any transport or
    /// HTTP-status error.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.http.get(url).send().await.and_then(|r| r.error_for_status()) {
            Ok(response) => response,
            Err(e) => {
                warn!(url, error = %e, "failed to fetch URL content");
                return None;
            }
        };

        match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(url, error = %e, "failed to read URL content");
                None
            }
        }
    }
}

impl Default for UrlFetcher {
    fn default() -> Self {
        Self::new()
    }
}
