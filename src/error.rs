use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not extract a video ID from: {0}")]
    UnresolvableUrl(String),

    #[error("watch URL is missing the `v` query parameter: {0}")]
    MissingVideoParam(String),

    #[error("no `{lang}` caption track available for video {video_id}")]
    NoCaptionTrack { video_id: String, lang: String },

    #[error("video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("chat input cannot be empty")]
    EmptyInput,

    #[error("API key not set: export {env_var} or add `api_key` to the config file")]
    MissingApiKey { env_var: &'static str },

    #[error("completion endpoint returned {status}: {body}")]
    CompletionStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not locate InnerTube API key in watch page for video {0}")]
    InnerTubeKey(String),

    #[error("error parsing caption XML: {0}")]
    CaptionXml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream response was not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
