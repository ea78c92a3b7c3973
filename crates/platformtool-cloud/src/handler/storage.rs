//! Object storage handler (create / list / upload)

use crate::error::{CloudError, Result};
use crate::gate;
use crate::provider::ObjectStoreClient;
use crate::tags::TagSet;
use std::path::Path;
use std::sync::Arc;

/// Requested access level for a new bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BucketAccess {
    Private,
    Public,
}

impl BucketAccess {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "private" => Ok(BucketAccess::Private),
            "public" => Ok(BucketAccess::Public),
            _ => Err(CloudError::InvalidParameter(format!(
                "invalid bucket access '{value}' (choose private or public)"
            ))),
        }
    }
}

/// Bucket names are derived, not user-chosen.
fn bucket_name_for(username: &str) -> String {
    format!("{username}-bucket")
}

fn confirmed(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Handler for object storage actions.
pub struct StorageHandler {
    client: Arc<dyn ObjectStoreClient>,
}

impl StorageHandler {
    pub fn new(client: Arc<dyn ObjectStoreClient>) -> Self {
        Self { client }
    }

    /// Create `{username}-bucket`, tag it, and open it up if public access
    /// was requested and explicitly confirmed.
    ///
    /// The confirmation guard runs before any provider call: refusing a
    /// public bucket must leave nothing behind.
    pub async fn create(
        &self,
        username: &str,
        bucket_access: &str,
        access_confirmation: Option<&str>,
    ) -> Result<String> {
        let access = BucketAccess::parse(bucket_access)?;
        if access == BucketAccess::Public && !confirmed(access_confirmation) {
            return Err(CloudError::ConfirmationRequired);
        }

        let name = bucket_name_for(username);
        let location = self.client.create_bucket(&name).await?;
        self.client
            .tag_bucket(&name, &TagSet::provenance(username))
            .await?;
        tracing::info!(bucket = %name, "bucket created and tagged");

        if access == BucketAccess::Public {
            // All four public-access-block flags are cleared together.
            self.client.allow_public_access(&name).await?;
            tracing::info!(bucket = %name, "public access block cleared");
        }
        Ok(location)
    }

    /// Names of every tool-created bucket, across all owners.
    pub async fn list(&self) -> Result<Vec<String>> {
        gate::tool_created_buckets(self.client.as_ref()).await
    }

    /// Upload a local file into a tool-created bucket.
    ///
    /// Ownership is checked by membership in the tool-created bucket set;
    /// a foreign bucket is a hard error here, unlike compute's soft skip.
    pub async fn upload(&self, bucket_name: &str, file_path: &str, file_name: &str) -> Result<()> {
        let created = gate::tool_created_buckets(self.client.as_ref()).await?;
        if !created.iter().any(|name| name == bucket_name) {
            return Err(CloudError::NotOwned(format!("bucket '{bucket_name}'")));
        }
        self.client
            .upload_file(Path::new(file_path), bucket_name, file_name)
            .await?;
        tracing::info!(bucket = %bucket_name, key = %file_name, "file uploaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_name_is_derived() {
        assert_eq!(bucket_name_for("bob"), "bob-bucket");
    }

    #[test]
    fn test_confirmation_is_case_insensitive() {
        assert!(confirmed(Some("true")));
        assert!(confirmed(Some("True")));
        assert!(!confirmed(Some("false")));
        assert!(!confirmed(Some("yes")));
        assert!(!confirmed(None));
    }

    #[test]
    fn test_parse_access() {
        assert_eq!(BucketAccess::parse("Private").unwrap(), BucketAccess::Private);
        assert_eq!(BucketAccess::parse("public").unwrap(), BucketAccess::Public);
        assert!(matches!(
            BucketAccess::parse("world-readable"),
            Err(CloudError::InvalidParameter(_))
        ));
    }
}
