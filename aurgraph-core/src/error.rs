use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AurError {
    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("AUR request failed: {reason}")]
    Rpc { reason: String },

    #[error("no results found for {name}")]
    TargetNotFound { name: String },

    #[error("no results found")]
    NoResults,

    #[error("invalid dependency string '{input}': {reason}")]
    InvalidDepstring { input: String, reason: String },

    #[error("invalid dependency kind spec '{input}'")]
    InvalidKindSpec { input: String },

    #[error("failed to read file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path:?}: {source}")]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("clone failed for {package}: {reason}")]
    Clone { package: String, reason: String },
}
