// Error types shared by the library modules. The binary wraps these in
// `anyhow` for reporting; library callers can match on the variants.

use std::path::PathBuf;

use thiserror::Error;

/// Problems reading or creating the INI config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },
    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures of a single request/response cycle against the challenge server.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {endpoint} ({status}) is not JSON: {source}")]
    InvalidJson {
        endpoint: String,
        status: reqwest::StatusCode,
        #[source]
        source: serde_json::Error,
    },
    #[error("response from {endpoint} has an unexpected shape: {source}")]
    UnexpectedShape {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("successful auth response is missing {field}")]
    IncompleteAuth { field: &'static str },
    #[error("request body for {endpoint} must serialize to a JSON object")]
    BodyNotObject { endpoint: String },
}

/// Task arguments the solvers could not make sense of.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("no solver for task {0}")]
    UnknownTask(u32),
    #[error("task {task} is missing argument {index}")]
    MissingArgument { task: u32, index: usize },
    #[error("task argument {0} is not an integer")]
    NotAnInteger(String),
    #[error("task argument {0} is not a string")]
    NotAString(String),
    #[error("product of task arguments overflows a 64-bit integer")]
    Overflow,
    #[error("invalid IPv4 address {0:?}")]
    InvalidAddress(String),
    #[error("invalid netmask {0:?}")]
    InvalidNetmask(String),
    #[error("invalid network {network}/{prefix}: {reason}")]
    InvalidNetwork {
        network: String,
        prefix: u8,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Task(#[from] TaskError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
