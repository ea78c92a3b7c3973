//! Validated request model
//!
//! Kind and action strings are parsed exactly once at the CLI boundary;
//! everything downstream works on the enums and never re-parses.

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};

/// Resource kinds the dispatcher can route to. Fixed, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Compute,
    ObjectStorage,
    DnsZone,
}

impl ResourceKind {
    /// Parse the `--resource` flag value (case-insensitive).
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "ec2" => Ok(ResourceKind::Compute),
            "s3" => Ok(ResourceKind::ObjectStorage),
            "route53" => Ok(ResourceKind::DnsZone),
            _ => Err(CloudError::InvalidResource(value.to_string())),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Compute => write!(f, "ec2"),
            ResourceKind::ObjectStorage => write!(f, "s3"),
            ResourceKind::DnsZone => write!(f, "route53"),
        }
    }
}

/// Actions accepted by the dispatcher. Which actions are legal depends on
/// the resource kind; the dispatcher rejects illegal pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Start,
    Stop,
    List,
    Upload,
    CreateZone,
    Delete,
    Upsert,
}

impl Action {
    /// Parse the `--action` flag value (case-insensitive).
    ///
    /// `update` normalizes to [`Action::Upsert`] here: UPSERT is the verb
    /// the DNS provider actually accepts, and nothing downstream should
    /// ever see "update".
    pub fn parse(kind: ResourceKind, value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "start" => Ok(Action::Start),
            "stop" => Ok(Action::Stop),
            "list" => Ok(Action::List),
            "upload" => Ok(Action::Upload),
            "create-zone" => Ok(Action::CreateZone),
            "delete" => Ok(Action::Delete),
            "update" | "upsert" => Ok(Action::Upsert),
            _ => Err(CloudError::UnsupportedAction {
                kind,
                action: value.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Start => write!(f, "start"),
            Action::Stop => write!(f, "stop"),
            Action::List => write!(f, "list"),
            Action::Upload => write!(f, "upload"),
            Action::CreateZone => write!(f, "create-zone"),
            Action::Delete => write!(f, "delete"),
            Action::Upsert => write!(f, "upsert"),
        }
    }
}

/// One invocation's worth of validated user input.
///
/// Constructed once by the CLI, immutable thereafter. Action-specific
/// fields stay optional here; required-ness is enforced per action by the
/// dispatcher, which names the missing field in the error.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    pub kind: ResourceKind,
    pub action: Action,
    pub username: Option<String>,

    // Compute
    pub instance_type: Option<String>,
    pub ami_choice: Option<String>,
    pub amount: Option<i64>,
    pub ec2_id: Option<String>,

    // Object storage
    pub bucket_access: Option<String>,
    pub access_confirmation: Option<String>,
    pub bucket_name: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,

    // DNS
    pub zone_id: Option<String>,
    pub record_type: Option<String>,
    pub record_name: Option<String>,
    pub dns_target: Option<String>,
    pub zone_type: Option<String>,
}

impl ResourceRequest {
    /// An empty request for the given kind and action; fill in the
    /// action-specific fields with struct update syntax.
    pub fn new(kind: ResourceKind, action: Action) -> Self {
        Self {
            kind,
            action,
            username: None,
            instance_type: None,
            ami_choice: None,
            amount: None,
            ec2_id: None,
            bucket_access: None,
            access_confirmation: None,
            bucket_name: None,
            file_path: None,
            file_name: None,
            zone_id: None,
            record_type: None,
            record_name: None,
            dns_target: None,
            zone_type: None,
        }
    }

    pub(crate) fn require_username(&self) -> Result<&str> {
        require(&self.username, "username")
    }
}

/// Extract a required field, naming it in the error when absent.
pub(crate) fn require<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    value.as_deref().ok_or(CloudError::MissingField(field))
}
