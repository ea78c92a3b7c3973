//! Route53-backed DNS client

use crate::api_error;
use async_trait::async_trait;
use aws_sdk_route53::error::DisplayErrorContext;
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, HostedZoneConfig, ResourceRecord, ResourceRecordSet,
    RrType, Tag, TagResourceType, Vpc, VpcRegion,
};
use platformtool_cloud::{CloudError, DnsClient, RecordAction, RecordChange, Result, TagSet, ZoneSpec};

/// DNS capability over the Route53 API.
pub struct Route53Dns {
    client: aws_sdk_route53::Client,
}

impl Route53Dns {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_route53::Client::new(config),
        }
    }
}

fn change_action(action: RecordAction) -> ChangeAction {
    match action {
        RecordAction::Create => ChangeAction::Create,
        RecordAction::Delete => ChangeAction::Delete,
        RecordAction::Upsert => ChangeAction::Upsert,
    }
}

#[async_trait]
impl DnsClient for Route53Dns {
    async fn create_zone(&self, spec: &ZoneSpec) -> Result<String> {
        tracing::debug!(zone = %spec.name, private = spec.private, "creating hosted zone");
        let mut request = self
            .client
            .create_hosted_zone()
            .name(&spec.name)
            .caller_reference(&spec.caller_reference);
        if let Some(vpc) = &spec.vpc {
            request = request.vpc(
                Vpc::builder()
                    .vpc_region(VpcRegion::from(vpc.region.as_str()))
                    .vpc_id(&vpc.vpc_id)
                    .build(),
            );
        }
        if spec.private {
            request = request
                .hosted_zone_config(HostedZoneConfig::builder().private_zone(true).build());
        }

        let output = request
            .send()
            .await
            .map_err(|e| api_error("CreateHostedZone", DisplayErrorContext(&e)))?;

        let zone = output
            .hosted_zone()
            .ok_or_else(|| CloudError::Api("CreateHostedZone returned no zone".to_string()))?;
        // Route53 reports ids as "/hostedzone/<id>".
        Ok(zone.id().trim_start_matches("/hostedzone/").to_string())
    }

    async fn tag_zone(&self, zone_id: &str, tags: &TagSet) -> Result<()> {
        let mut request = self
            .client
            .change_tags_for_resource()
            .resource_type(TagResourceType::Hostedzone)
            .resource_id(zone_id);
        for tag in tags.iter() {
            request = request.add_tags(Tag::builder().key(&tag.key).value(&tag.value).build());
        }
        request
            .send()
            .await
            .map_err(|e| api_error("ChangeTagsForResource", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn zone_tags(&self, zone_id: &str) -> Result<TagSet> {
        let output = self
            .client
            .list_tags_for_resource()
            .resource_type(TagResourceType::Hostedzone)
            .resource_id(zone_id)
            .send()
            .await
            .map_err(|e| api_error("ListTagsForResource", DisplayErrorContext(&e)))?;

        Ok(output
            .resource_tag_set()
            .map(|set| set.tags())
            .unwrap_or_default()
            .iter()
            .filter_map(|tag| Some((tag.key()?.to_string(), tag.value()?.to_string())))
            .collect())
    }

    async fn change_record(&self, change: &RecordChange) -> Result<()> {
        let record = ResourceRecord::builder()
            .value(&change.value)
            .build()
            .map_err(|e| api_error("ChangeResourceRecordSets", e))?;
        let record_set = ResourceRecordSet::builder()
            .name(&change.fqdn)
            .r#type(RrType::from(change.record_type.as_str()))
            .ttl(change.ttl)
            .resource_records(record)
            .build()
            .map_err(|e| api_error("ChangeResourceRecordSets", e))?;
        let batch = ChangeBatch::builder()
            .changes(
                Change::builder()
                    .action(change_action(change.action))
                    .resource_record_set(record_set)
                    .build()
                    .map_err(|e| api_error("ChangeResourceRecordSets", e))?,
            )
            .build()
            .map_err(|e| api_error("ChangeResourceRecordSets", e))?;

        self.client
            .change_resource_record_sets()
            .hosted_zone_id(&change.zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| api_error("ChangeResourceRecordSets", DisplayErrorContext(&e)))?;
        Ok(())
    }
}
