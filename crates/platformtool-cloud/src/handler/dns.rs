//! DNS zone handler (create-zone / record mutation)

use crate::error::{CloudError, Result};
use crate::gate;
use crate::provider::{DnsClient, RecordAction, RecordChange, VpcBinding, ZoneSpec};
use crate::tags::TagSet;
use std::sync::Arc;

/// Private zones bind to this fixed virtual network.
const VPC_ID: &str = "vpc-058154e6ed31674ee";
const VPC_REGION: &str = "us-east-1";

const RECORD_TTL: i64 = 300;

/// Requested visibility for a new zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoneType {
    Public,
    Private,
}

impl ZoneType {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "public" => Ok(ZoneType::Public),
            "private" => Ok(ZoneType::Private),
            _ => Err(CloudError::InvalidParameter(format!(
                "invalid zone type '{value}' (choose public or private)"
            ))),
        }
    }
}

/// Zone names carry a fixed suffix, not user-configurable.
fn zone_name_for(username: &str) -> String {
    format!("{username}-zone.com")
}

/// Record names live under the user's zone.
fn record_fqdn(record_name: &str, username: &str) -> String {
    format!("{record_name}.{}", zone_name_for(username))
}

/// Handler for hosted zone and record actions.
pub struct DnsHandler {
    client: Arc<dyn DnsClient>,
}

impl DnsHandler {
    pub fn new(client: Arc<dyn DnsClient>) -> Self {
        Self { client }
    }

    /// Create `{username}-zone.com` and tag it with provenance.
    ///
    /// Creation and tagging are two independent provider calls with no
    /// compensating rollback: a tagging failure leaves an untagged zone
    /// behind. The caller reference is the current second; two creations
    /// within the same second are rejected by the provider and not retried.
    pub async fn create_zone(&self, username: &str, zone_type: &str) -> Result<String> {
        let zone_type = ZoneType::parse(zone_type)?;
        let spec = ZoneSpec {
            name: zone_name_for(username),
            caller_reference: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            private: zone_type == ZoneType::Private,
            vpc: match zone_type {
                ZoneType::Private => Some(VpcBinding {
                    region: VPC_REGION.to_string(),
                    vpc_id: VPC_ID.to_string(),
                }),
                ZoneType::Public => None,
            },
        };
        let zone_id = self.client.create_zone(&spec).await?;
        tracing::info!(%zone_id, zone = %spec.name, "hosted zone created");
        self.client
            .tag_zone(&zone_id, &TagSet::provenance(username))
            .await?;
        tracing::info!(%zone_id, "hosted zone tagged");
        Ok(zone_id)
    }

    /// Mutate one record in a tool-created zone.
    ///
    /// A zone that fails the ownership gate is a hard error, unlike
    /// compute's soft skip. Returns the fully qualified record name.
    pub async fn change_record(
        &self,
        action: RecordAction,
        username: &str,
        zone_id: &str,
        record_name: &str,
        record_type: &str,
        dns_target: &str,
    ) -> Result<String> {
        if !gate::zone_tool_created(self.client.as_ref(), zone_id).await? {
            return Err(CloudError::NotOwned(format!("zone '{zone_id}'")));
        }
        let fqdn = record_fqdn(record_name, username);
        let change = RecordChange {
            zone_id: zone_id.to_string(),
            action,
            fqdn: fqdn.clone(),
            record_type: record_type.to_string(),
            ttl: RECORD_TTL,
            value: dns_target.to_string(),
        };
        self.client.change_record(&change).await?;
        tracing::info!(%zone_id, record = %fqdn, verb = %action, "record change applied");
        Ok(fqdn)
    }
}
