//! Request dispatch
//!
//! Routes a validated [`ResourceRequest`] to the matching handler method.
//! The dispatcher itself has no side effects: it checks field presence,
//! rejects `(kind, action)` pairs that make no sense, and translates
//! handler results into one uniform [`Outcome`].

use crate::error::{CloudError, Result};
use crate::handler::{ComputeHandler, ControlOutcome, DnsHandler, StorageHandler};
use crate::provider::{ComputeClient, DnsClient, ObjectStoreClient, RecordAction};
use crate::request::{require, Action, ResourceKind, ResourceRequest};
use std::sync::Arc;

/// What a successful dispatch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Instance ids, in launch order.
    InstancesCreated(Vec<String>),
    /// Instance ids matching the caller's provenance filter.
    Instances(Vec<String>),
    InstanceStarted(String),
    InstanceStopped(String),
    /// The ownership gate refused a start/stop; the action was skipped,
    /// not errored. Compute only.
    NotOwnedSkipped(String),
    /// Canonical location of the created bucket.
    BucketCreated(String),
    /// Names of all tool-created buckets.
    Buckets(Vec<String>),
    Uploaded { bucket: String, key: String },
    ZoneCreated(String),
    RecordChanged { fqdn: String, action: RecordAction },
}

/// Ownership-gated action dispatcher.
pub struct Dispatcher {
    compute: ComputeHandler,
    storage: StorageHandler,
    dns: DnsHandler,
}

impl Dispatcher {
    pub fn new(
        compute: Arc<dyn ComputeClient>,
        storage: Arc<dyn ObjectStoreClient>,
        dns: Arc<dyn DnsClient>,
    ) -> Self {
        Self {
            compute: ComputeHandler::new(compute),
            storage: StorageHandler::new(storage),
            dns: DnsHandler::new(dns),
        }
    }

    pub async fn dispatch(&self, request: &ResourceRequest) -> Result<Outcome> {
        match (request.kind, request.action) {
            // ---- compute ----
            (ResourceKind::Compute, Action::Create) => {
                let username = request.require_username()?;
                let ami_choice = require(&request.ami_choice, "ami_choice")?;
                let instance_type = require(&request.instance_type, "instance_type")?;
                let amount = request.amount.ok_or(CloudError::MissingField("amount"))?;
                let ids = self
                    .compute
                    .create(username, ami_choice, instance_type, amount)
                    .await?;
                Ok(Outcome::InstancesCreated(ids))
            }
            (ResourceKind::Compute, Action::Start) => {
                let username = request.require_username()?;
                let instance_id = require(&request.ec2_id, "ec2_id")?;
                match self.compute.start(username, instance_id).await? {
                    ControlOutcome::Applied => Ok(Outcome::InstanceStarted(instance_id.to_string())),
                    ControlOutcome::SkippedNotOwned => {
                        Ok(Outcome::NotOwnedSkipped(instance_id.to_string()))
                    }
                }
            }
            (ResourceKind::Compute, Action::Stop) => {
                let username = request.require_username()?;
                let instance_id = require(&request.ec2_id, "ec2_id")?;
                match self.compute.stop(username, instance_id).await? {
                    ControlOutcome::Applied => Ok(Outcome::InstanceStopped(instance_id.to_string())),
                    ControlOutcome::SkippedNotOwned => {
                        Ok(Outcome::NotOwnedSkipped(instance_id.to_string()))
                    }
                }
            }
            (ResourceKind::Compute, Action::List) => {
                let username = request.require_username()?;
                Ok(Outcome::Instances(self.compute.list(username).await?))
            }

            // ---- object storage ----
            (ResourceKind::ObjectStorage, Action::Create) => {
                let username = request.require_username()?;
                let bucket_access = require(&request.bucket_access, "bucket_access")?;
                let location = self
                    .storage
                    .create(
                        username,
                        bucket_access,
                        request.access_confirmation.as_deref(),
                    )
                    .await?;
                Ok(Outcome::BucketCreated(location))
            }
            (ResourceKind::ObjectStorage, Action::List) => {
                Ok(Outcome::Buckets(self.storage.list().await?))
            }
            (ResourceKind::ObjectStorage, Action::Upload) => {
                let file_name = require(&request.file_name, "file_name")?;
                let bucket_name = require(&request.bucket_name, "bucket_name")?;
                let file_path = require(&request.file_path, "file_path")?;
                self.storage.upload(bucket_name, file_path, file_name).await?;
                Ok(Outcome::Uploaded {
                    bucket: bucket_name.to_string(),
                    key: file_name.to_string(),
                })
            }

            // ---- dns ----
            (ResourceKind::DnsZone, Action::CreateZone) => {
                let username = request.require_username()?;
                let zone_type = require(&request.zone_type, "zone_type")?;
                let zone_id = self.dns.create_zone(username, zone_type).await?;
                Ok(Outcome::ZoneCreated(zone_id))
            }
            (ResourceKind::DnsZone, action @ (Action::Create | Action::Delete | Action::Upsert)) => {
                let username = request.require_username()?;
                let zone_id = require(&request.zone_id, "zone_id")?;
                let record_name = require(&request.record_name, "record_name")?;
                let record_type = require(&request.record_type, "record_type")?;
                let dns_target = require(&request.dns_target, "dns_target")?;
                let record_action = match action {
                    Action::Create => RecordAction::Create,
                    Action::Delete => RecordAction::Delete,
                    _ => RecordAction::Upsert,
                };
                let fqdn = self
                    .dns
                    .change_record(
                        record_action,
                        username,
                        zone_id,
                        record_name,
                        record_type,
                        dns_target,
                    )
                    .await?;
                Ok(Outcome::RecordChanged {
                    fqdn,
                    action: record_action,
                })
            }

            (kind, action) => Err(CloudError::UnsupportedAction {
                kind,
                action: action.to_string(),
            }),
        }
    }
}
