//! Ownership gate
//!
//! Provenance checks run before every destructive or stateful action.
//! Each check re-queries the provider on the spot; nothing is cached, so a
//! tag removed out-of-band between two invocations is seen immediately.
//!
//! The scoping is deliberately uneven and mirrors observed behavior: the
//! compute check filters by owner as well as provenance, while the bucket
//! and zone checks look at tag presence only. See DESIGN.md.

use crate::error::Result;
use crate::provider::{ComputeClient, DnsClient, ObjectStoreClient};
use crate::tags::TagSet;

/// True iff `instance_id` carries the provenance tags for `username`.
///
/// Issues a describe filtered on `created-by-tool=true, owner=username`
/// and scoped to the one id; owned means the filtered lookup returned it.
pub async fn instance_owned(
    client: &dyn ComputeClient,
    instance_id: &str,
    username: &str,
) -> Result<bool> {
    let filter = TagSet::provenance(username);
    let ids = [instance_id.to_string()];
    let matched = client.describe_instances(&filter, &ids).await?;
    Ok(matched.iter().any(|id| id == instance_id))
}

/// Names of all buckets carrying the `created-by-tool` tag, any owner.
///
/// Buckets without tags are skipped, not errors.
pub async fn tool_created_buckets(client: &dyn ObjectStoreClient) -> Result<Vec<String>> {
    let mut created = Vec::new();
    for name in client.list_buckets().await? {
        if let Some(tags) = client.bucket_tags(&name).await? {
            if tags.is_tool_created() {
                created.push(name);
            }
        }
    }
    Ok(created)
}

/// True iff the zone carries the `created-by-tool` tag, any owner.
pub async fn zone_tool_created(client: &dyn DnsClient, zone_id: &str) -> Result<bool> {
    let tags = client.zone_tags(zone_id).await?;
    Ok(tags.is_tool_created())
}
