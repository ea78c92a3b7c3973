use clap::Parser;
use colored::Colorize;
use platformtool_cloud::{Action, CloudError, Dispatcher, Outcome, ResourceKind, ResourceRequest};
use platformtool_cloud_aws::{Ec2Compute, Route53Dns, S3ObjectStore};
use std::sync::Arc;

/// Manage AWS resources from the command line.
///
/// Every flag is optional at the parser level; which fields an action
/// actually needs is enforced by the dispatcher, which names the missing
/// field in its error.
#[derive(Parser)]
#[command(name = "platformtool")]
#[command(about = "Manage EC2, S3 and Route53 resources from the command line", long_about = None)]
struct Cli {
    /// AWS resource to manage: ec2, s3 or route53
    #[arg(long)]
    resource: Option<String>,

    /// Action to perform: create, start, stop, list, upload, create-zone,
    /// delete, update/upsert
    #[arg(long)]
    action: Option<String>,

    /// Name of the user acting; created resources are tagged as theirs
    #[arg(long, env = "PLATFORMTOOL_USERNAME")]
    username: Option<String>,

    /// Instance type to launch (only t2.micro is allowed)
    #[arg(long = "instance_type")]
    instance_type: Option<String>,

    /// AMI to launch: ubuntu or "amazon linux"
    #[arg(long = "ami_choice")]
    ami_choice: Option<String>,

    /// How many instances to create (1 or 2)
    #[arg(long)]
    amount: Option<i64>,

    /// Id of the instance to start or stop
    #[arg(long = "ec2_id")]
    ec2_id: Option<String>,

    /// Bucket access level: private or public
    #[arg(long = "bucket_access")]
    bucket_access: Option<String>,

    /// Pass "true" to confirm creating a public bucket
    #[arg(long = "access_confirmation")]
    access_confirmation: Option<String>,

    /// Bucket to upload into
    #[arg(long = "bucket_name")]
    bucket_name: Option<String>,

    /// Local path of the file to upload
    #[arg(long = "file_path")]
    file_path: Option<String>,

    /// Object key to upload the file under
    #[arg(long = "file_name")]
    file_name: Option<String>,

    /// Hosted zone id for record changes
    #[arg(long = "zone_id")]
    zone_id: Option<String>,

    /// DNS record type (A, CNAME, ...)
    #[arg(long = "record_type")]
    record_type: Option<String>,

    /// Record name; the zone suffix is appended automatically
    #[arg(long = "record_name")]
    record_name: Option<String>,

    /// Where the record should point
    #[arg(long = "dns_target")]
    dns_target: Option<String>,

    /// Zone visibility: public or private
    #[arg(long = "zone_type")]
    zone_type: Option<String>,
}

impl Cli {
    fn into_request(self, kind: ResourceKind, action: Action) -> ResourceRequest {
        ResourceRequest {
            username: self.username,
            instance_type: self.instance_type,
            ami_choice: self.ami_choice,
            amount: self.amount,
            ec2_id: self.ec2_id,
            bucket_access: self.bucket_access,
            access_confirmation: self.access_confirmation,
            bucket_name: self.bucket_name,
            file_path: self.file_path,
            file_name: self.file_name,
            zone_id: self.zone_id,
            record_type: self.record_type,
            record_name: self.record_name,
            dns_target: self.dns_target,
            zone_type: self.zone_type,
            ..ResourceRequest::new(kind, action)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // No resource requested: nothing to do.
    let Some(resource) = cli.resource.as_deref() else {
        return Ok(());
    };
    let kind = ResourceKind::parse(resource)?;
    let action_value = cli
        .action
        .as_deref()
        .ok_or(CloudError::MissingField("action"))?;
    let action = Action::parse(kind, action_value)?;
    let request = cli.into_request(kind, action);

    let config = aws_config::load_from_env().await;
    let dispatcher = Dispatcher::new(
        Arc::new(Ec2Compute::new(&config)),
        Arc::new(S3ObjectStore::new(&config)),
        Arc::new(Route53Dns::new(&config)),
    );

    let outcome = dispatcher.dispatch(&request).await?;
    report(&outcome);
    Ok(())
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::InstancesCreated(ids) => {
            for id in ids {
                println!("{}", format!("✓ instance created: {id}").green());
            }
        }
        Outcome::Instances(ids) => {
            if ids.is_empty() {
                println!("no instances found for this user");
            } else {
                for id in ids {
                    println!("{id}");
                }
            }
        }
        Outcome::InstanceStarted(id) => {
            println!("{}", format!("✓ instance started: {id}").green().bold());
        }
        Outcome::InstanceStopped(id) => {
            println!("{}", format!("✓ instance stopped: {id}").green().bold());
        }
        Outcome::NotOwnedSkipped(id) => {
            println!(
                "{}",
                format!("ℹ skipped {id}: instance was not created by this tool").yellow()
            );
        }
        Outcome::BucketCreated(location) => {
            println!("{}", format!("✓ bucket created: {location}").green().bold());
        }
        Outcome::Buckets(names) => {
            if names.is_empty() {
                println!("no buckets created by this tool");
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        Outcome::Uploaded { bucket, key } => {
            println!(
                "{}",
                format!("✓ uploaded {key} to bucket {bucket}").green().bold()
            );
        }
        Outcome::ZoneCreated(zone_id) => {
            println!("{}", format!("✓ hosted zone created: {zone_id}").green().bold());
        }
        Outcome::RecordChanged { fqdn, action } => {
            println!("{}", format!("✓ {action} applied to {fqdn}").green().bold());
        }
    }
}
