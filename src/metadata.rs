use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{Error, Result};

const OEMBED_URL: &str = "https://www.youtube.com/oembed";

#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: String,
}

/// Fetch the video's display title via YouTube's oEmbed lookup.
///
/// The lookup is keyed by the raw URL; YouTube performs its own
/// resolution. Single attempt, no retry.
pub async fn fetch_title(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!("Fetching video title for {url}");

    let resp = client
        .get(OEMBED_URL)
        .query(&[("url", url), ("format", "json")])
        .send()
        .await?;

    let status = resp.status();
    if status == StatusCode::NOT_FOUND || status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::VideoUnavailable(url.to_string()));
    }

    let body: OembedResponse = resp.error_for_status()?.json().await?;
    Ok(body.title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_oembed_response() {
        let json = r#"{"title":"Test Video","author_name":"Someone","provider_name":"YouTube"}"#;
        let parsed: OembedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title, "Test Video");
    }

    #[test]
    fn test_parse_oembed_response_missing_title() {
        let json = r#"{"author_name":"Someone"}"#;
        assert!(serde_json::from_str::<OembedResponse>(json).is_err());
    }
}
