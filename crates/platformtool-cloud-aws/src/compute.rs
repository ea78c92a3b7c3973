//! EC2-backed compute client

use crate::api_error;
use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{Filter, InstanceType, Placement, ResourceType, Tag, TagSpecification};
use platformtool_cloud::{CloudError, ComputeClient, LaunchSpec, Result, TagSet};

/// Compute capability over the EC2 API.
pub struct Ec2Compute {
    client: aws_sdk_ec2::Client,
}

impl Ec2Compute {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_ec2::Client::new(config),
        }
    }
}

#[async_trait]
impl ComputeClient for Ec2Compute {
    async fn run_instance(&self, spec: &LaunchSpec) -> Result<String> {
        tracing::debug!(image_id = %spec.image_id, instance_type = %spec.instance_type, "launching instance");
        let mut tag_spec = TagSpecification::builder().resource_type(ResourceType::Instance);
        for tag in spec.tags.iter() {
            tag_spec = tag_spec.tags(Tag::builder().key(&tag.key).value(&tag.value).build());
        }

        let output = self
            .client
            .run_instances()
            .image_id(&spec.image_id)
            .instance_type(InstanceType::from(spec.instance_type.as_str()))
            .min_count(1)
            .max_count(1)
            .placement(
                Placement::builder()
                    .availability_zone(&spec.availability_zone)
                    .build(),
            )
            .subnet_id(&spec.subnet_id)
            .tag_specifications(tag_spec.build())
            .send()
            .await
            .map_err(|e| api_error("RunInstances", DisplayErrorContext(&e)))?;

        output
            .instances()
            .first()
            .and_then(|instance| instance.instance_id())
            .map(str::to_string)
            .ok_or_else(|| CloudError::Api("RunInstances returned no instance id".to_string()))
    }

    async fn describe_instances(
        &self,
        filter: &TagSet,
        instance_ids: &[String],
    ) -> Result<Vec<String>> {
        let mut request = self.client.describe_instances();
        for tag in filter.iter() {
            request = request.filters(
                Filter::builder()
                    .name(format!("tag:{}", tag.key))
                    .values(&tag.value)
                    .build(),
            );
        }
        if !instance_ids.is_empty() {
            request = request.set_instance_ids(Some(instance_ids.to_vec()));
        }

        let output = request
            .send()
            .await
            .map_err(|e| api_error("DescribeInstances", DisplayErrorContext(&e)))?;

        Ok(output
            .reservations()
            .iter()
            .flat_map(|reservation| reservation.instances())
            .filter_map(|instance| instance.instance_id())
            .map(str::to_string)
            .collect())
    }

    async fn start_instance(&self, instance_id: &str) -> Result<()> {
        self.client
            .start_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| api_error("StartInstances", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn stop_instance(&self, instance_id: &str) -> Result<()> {
        self.client
            .stop_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| api_error("StopInstances", DisplayErrorContext(&e)))?;
        Ok(())
    }
}
