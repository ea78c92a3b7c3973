//! Compute handler (create / start / stop / list)

use crate::error::{CloudError, Result};
use crate::gate;
use crate::provider::{ComputeClient, LaunchSpec};
use crate::tags::TagSet;
use std::sync::Arc;

/// Instance types users are allowed to launch.
const ALLOWED_INSTANCE_TYPES: &[&str] = &["t2.micro"];

/// Placement is fixed, not parameterized.
const AVAILABILITY_ZONE: &str = "us-east-1a";
const SUBNET_ID: &str = "subnet-0992c1cd4b004598c";

/// Map the logical AMI choice to a machine image id.
fn image_for_choice(ami_choice: &str) -> Result<&'static str> {
    match ami_choice.to_ascii_lowercase().as_str() {
        "ubuntu" => Ok("ami-0e86e20dae9224db8"),
        "amazon linux" => Ok("ami-0182f373e66f89c85"),
        _ => Err(CloudError::InvalidParameter(format!(
            "invalid AMI '{ami_choice}' (valid options are Ubuntu and Amazon Linux)"
        ))),
    }
}

/// Outcome of a gated start/stop request.
///
/// Unlike the other handlers, compute treats a failed ownership check as a
/// soft outcome: the action is skipped and reported, not raised as an
/// error. Observed source behavior, kept on purpose (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    Applied,
    SkippedNotOwned,
}

/// Handler for virtual machine actions.
pub struct ComputeHandler {
    client: Arc<dyn ComputeClient>,
}

impl ComputeHandler {
    pub fn new(client: Arc<dyn ComputeClient>) -> Self {
        Self { client }
    }

    /// Launch `amount` instances, one request each, tagged with provenance
    /// plus a generated `Name` of the form `{username}-{ami_choice}{i}`.
    ///
    /// Launches are sequential and not atomic as a group: a failure partway
    /// leaves the earlier instances live and tagged.
    pub async fn create(
        &self,
        username: &str,
        ami_choice: &str,
        instance_type: &str,
        amount: i64,
    ) -> Result<Vec<String>> {
        if !(1..=2).contains(&amount) {
            return Err(CloudError::AmountOutOfRange(amount));
        }
        if !ALLOWED_INSTANCE_TYPES.contains(&instance_type) {
            return Err(CloudError::InvalidParameter(format!(
                "instance type '{instance_type}' is not allowed (allowed: {})",
                ALLOWED_INSTANCE_TYPES.join(", ")
            )));
        }
        let image_id = image_for_choice(ami_choice)?;

        let mut instance_ids = Vec::with_capacity(amount as usize);
        for i in 1..=amount {
            let mut tags = TagSet::provenance(username);
            tags.insert("Name", format!("{username}-{ami_choice}{i}"));
            let spec = LaunchSpec {
                image_id: image_id.to_string(),
                instance_type: instance_type.to_string(),
                availability_zone: AVAILABILITY_ZONE.to_string(),
                subnet_id: SUBNET_ID.to_string(),
                tags,
            };
            let instance_id = self.client.run_instance(&spec).await?;
            tracing::info!(%instance_id, "instance created");
            instance_ids.push(instance_id);
        }
        Ok(instance_ids)
    }

    /// Start an instance if it passes the ownership gate.
    pub async fn start(&self, username: &str, instance_id: &str) -> Result<ControlOutcome> {
        if !gate::instance_owned(self.client.as_ref(), instance_id, username).await? {
            tracing::warn!(instance_id, "skipping start: instance was not created by this tool");
            return Ok(ControlOutcome::SkippedNotOwned);
        }
        self.client.start_instance(instance_id).await?;
        tracing::info!(instance_id, "instance started");
        Ok(ControlOutcome::Applied)
    }

    /// Stop an instance if it passes the ownership gate.
    pub async fn stop(&self, username: &str, instance_id: &str) -> Result<ControlOutcome> {
        if !gate::instance_owned(self.client.as_ref(), instance_id, username).await? {
            tracing::warn!(instance_id, "skipping stop: instance was not created by this tool");
            return Ok(ControlOutcome::SkippedNotOwned);
        }
        self.client.stop_instance(instance_id).await?;
        tracing::info!(instance_id, "instance stopped");
        Ok(ControlOutcome::Applied)
    }

    /// Ids of this user's tool-created instances.
    ///
    /// Read-only and already scoped by the provenance+owner filter, so no
    /// separate gate check is needed.
    pub async fn list(&self, username: &str) -> Result<Vec<String>> {
        let filter = TagSet::provenance(username);
        self.client.describe_instances(&filter, &[]).await
    }
}
