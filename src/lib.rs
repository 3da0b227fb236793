pub mod completion;
pub mod config;
pub mod error;
pub mod metadata;
pub mod prompt;
pub mod youtube;

pub use error::{Error, Result};

use url::Url;

/// Flattened caption transcript for a single video
#[derive(Debug, Clone)]
pub struct Transcript {
    pub video_id: String,
    pub language: String,
    pub text: String,
}

/// Extract the video ID from the recognized YouTube URL shapes:
///
///   https://youtu.be/ID
///   https://[www.]youtube.com/watch?v=ID
///   https://[www.]youtube.com/embed/ID
///   https://[www.]youtube.com/v/ID
///   https://[www.]youtube.com/shorts/ID
///
/// A `/watch` URL without a `v` parameter fails with
/// [`Error::MissingVideoParam`]; anything else that does not match fails
/// with [`Error::UnresolvableUrl`]. Malformed URLs never panic.
pub fn resolve(input: &str) -> Result<String> {
    let input = input.trim();
    let parsed = Url::parse(input).map_err(|_| Error::UnresolvableUrl(input.to_string()))?;
    let Some(host) = parsed.host_str() else {
        return Err(Error::UnresolvableUrl(input.to_string()));
    };

    if host == "youtu.be" {
        let id = parsed.path().strip_prefix('/').unwrap_or(parsed.path());
        if !id.is_empty() {
            return Ok(id.to_string());
        }
        return Err(Error::UnresolvableUrl(input.to_string()));
    }

    if host == "youtube.com" || host == "www.youtube.com" {
        if parsed.path() == "/watch" {
            return parsed
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned())
                .ok_or_else(|| Error::MissingVideoParam(input.to_string()));
        }

        for prefix in ["/embed/", "/v/", "/shorts/"] {
            if parsed.path().starts_with(prefix) {
                // third `/`-delimited segment: "/embed/ID" -> ["", "embed", "ID"]
                return parsed
                    .path()
                    .split('/')
                    .nth(2)
                    .filter(|id| !id.is_empty())
                    .map(|id| id.to_string())
                    .ok_or_else(|| Error::UnresolvableUrl(input.to_string()));
            }
        }
    }

    Err(Error::UnresolvableUrl(input.to_string()))
}

/// Build a centered `<iframe>` fragment embedding the video player.
///
/// An unresolvable URL renders with an empty ID segment rather than
/// failing; callers that want to guard should call [`resolve`] first.
pub fn embed_html(url: &str) -> String {
    let video_id = resolve(url).unwrap_or_default();
    format!(
        r#"<div style="display: flex; justify-content: center;">
    <iframe
        width="60%"
        height="400"
        src="https://www.youtube.com/embed/{video_id}"
        frameborder="0"
        allowfullscreen
        title="YouTube video player"
    ></iframe>
</div>"#
    )
}
