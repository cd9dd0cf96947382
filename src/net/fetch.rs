//! Blocking page fetch for the CLI front end.

use url::Url;

/// Error during fetch
#[derive(Debug)]
pub struct FetchError {
    pub message: String,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A fetched page, with the final URL after redirects.
pub struct FetchedPage {
    pub html: String,
    pub url: String,
}

/// Fetch a URL and return the HTML content (blocking).
pub fn fetch_page(url_str: &str) -> Result<FetchedPage, FetchError> {
    // Scheme-less input is treated as https
    let with_scheme = if url_str.starts_with("http://") || url_str.starts_with("https://") {
        url_str.to_string()
    } else {
        format!("https://{}", url_str)
    };

    let parsed = Url::parse(&with_scheme).map_err(|e| FetchError {
        message: format!("Invalid URL: {}", e),
    })?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("pagegroom/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(20))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| FetchError {
            message: format!("Client error: {}", e),
        })?;

    let response = client
        .get(parsed.as_str())
        .header("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
        .send()
        .map_err(|e| FetchError {
            message: format!("Request failed: {}", e),
        })?;

    let status = response.status();
    let final_url = response.url().to_string();
    if !status.is_success() {
        // Error pages still parse and enhance; note the status.
        log::warn!("{}: HTTP {}", final_url, status.as_u16());
    }

    let html = response.text().map_err(|e| FetchError {
        message: format!("Failed to read body: {}", e),
    })?;

    log::debug!("fetched {} ({} bytes)", final_url, html.len());

    Ok(FetchedPage {
        html,
        url: final_url,
    })
}
