//! Provider capability traits
//!
//! One typed capability per resource kind. The handlers only ever talk to
//! these traits; `platformtool-cloud-aws` implements them over the AWS SDK
//! and the test suite implements them in memory.
//!
//! Every call is one blocking provider round-trip from the handler's point
//! of view. There is no timeout or retry layer here; callers who need a
//! deadline wrap the client themselves.

use crate::error::Result;
use crate::tags::TagSet;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to launch one virtual machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSpec {
    pub image_id: String,
    pub instance_type: String,
    pub availability_zone: String,
    pub subnet_id: String,
    /// Tags stamped onto the instance at launch, provenance included.
    pub tags: TagSet,
}

/// Compute capability (EC2 or equivalent).
#[async_trait]
pub trait ComputeClient: Send + Sync {
    /// Launch exactly one instance and return its provider-assigned id.
    async fn run_instance(&self, spec: &LaunchSpec) -> Result<String>;

    /// Ids of instances matching every tag in `filter`, optionally
    /// restricted to `instance_ids` (empty slice means no restriction).
    async fn describe_instances(
        &self,
        filter: &TagSet,
        instance_ids: &[String],
    ) -> Result<Vec<String>>;

    async fn start_instance(&self, instance_id: &str) -> Result<()>;

    async fn stop_instance(&self, instance_id: &str) -> Result<()>;
}

/// Object storage capability (S3 or equivalent).
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// Create a bucket and return its canonical location string.
    async fn create_bucket(&self, name: &str) -> Result<String>;

    async fn tag_bucket(&self, name: &str, tags: &TagSet) -> Result<()>;

    /// The bucket's tag set, or `None` for a bucket with no tags at all.
    async fn bucket_tags(&self, name: &str) -> Result<Option<TagSet>>;

    async fn list_buckets(&self) -> Result<Vec<String>>;

    /// Clear all four public-access-block flags together. Partial clearing
    /// is not supported.
    async fn allow_public_access(&self, name: &str) -> Result<()>;

    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> Result<()>;
}

/// Everything needed to create one hosted zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub name: String,
    /// Must be unique per creation call at the provider.
    pub caller_reference: String,
    pub private: bool,
    /// Set iff the zone is private.
    pub vpc: Option<VpcBinding>,
}

/// Virtual network a private zone is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcBinding {
    pub region: String,
    pub vpc_id: String,
}

/// The verb sent to the provider for a record change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordAction {
    Create,
    Delete,
    Upsert,
}

impl std::fmt::Display for RecordAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordAction::Create => write!(f, "CREATE"),
            RecordAction::Delete => write!(f, "DELETE"),
            RecordAction::Upsert => write!(f, "UPSERT"),
        }
    }
}

/// One record mutation. Exactly one record value per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordChange {
    pub zone_id: String,
    pub action: RecordAction,
    pub fqdn: String,
    pub record_type: String,
    pub ttl: i64,
    pub value: String,
}

/// DNS capability (Route53 or equivalent).
#[async_trait]
pub trait DnsClient: Send + Sync {
    /// Create a hosted zone and return its id.
    async fn create_zone(&self, spec: &ZoneSpec) -> Result<String>;

    async fn tag_zone(&self, zone_id: &str, tags: &TagSet) -> Result<()>;

    async fn zone_tags(&self, zone_id: &str) -> Result<TagSet>;

    async fn change_record(&self, change: &RecordChange) -> Result<()>;
}
