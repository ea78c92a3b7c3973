//! Dispatch error types

use crate::request::ResourceKind;
use thiserror::Error;

/// Errors surfaced by the dispatcher and resource handlers
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("not a valid resource: '{0}' (valid resources are: ec2, s3, route53)")]
    InvalidResource(String),

    #[error("action '{action}' is not supported for resource '{kind}'")]
    UnsupportedAction { kind: ResourceKind, action: String },

    #[error("missing required field: --{0}")]
    MissingField(&'static str),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("pass --access_confirmation true to create a public bucket")]
    ConfirmationRequired,

    #[error("not created by this tool: {0}")]
    NotOwned(String),

    #[error("invalid amount of instances: {0} (between 1 and 2 can be created)")]
    AmountOutOfRange(i64),

    #[error("provider API error: {0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
