//! S3-backed object storage client

use crate::api_error;
use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketCannedAcl, PublicAccessBlockConfiguration, Tag, Tagging};
use platformtool_cloud::{ObjectStoreClient, Result, TagSet};
use std::path::Path;

/// Object storage capability over the S3 API.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }
}

#[async_trait]
impl ObjectStoreClient for S3ObjectStore {
    async fn create_bucket(&self, name: &str) -> Result<String> {
        let output = self
            .client
            .create_bucket()
            .acl(BucketCannedAcl::Private)
            .bucket(name)
            .send()
            .await
            .map_err(|e| api_error("CreateBucket", DisplayErrorContext(&e)))?;

        // S3 reports the location as "/<bucket>".
        Ok(output
            .location()
            .unwrap_or(name)
            .trim_start_matches('/')
            .to_string())
    }

    async fn tag_bucket(&self, name: &str, tags: &TagSet) -> Result<()> {
        let mut tag_set = Tagging::builder();
        for tag in tags.iter() {
            tag_set = tag_set.tag_set(
                Tag::builder()
                    .key(&tag.key)
                    .value(&tag.value)
                    .build()
                    .map_err(|e| api_error("PutBucketTagging", e))?,
            );
        }
        self.client
            .put_bucket_tagging()
            .bucket(name)
            .tagging(
                tag_set
                    .build()
                    .map_err(|e| api_error("PutBucketTagging", e))?,
            )
            .send()
            .await
            .map_err(|e| api_error("PutBucketTagging", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn bucket_tags(&self, name: &str) -> Result<Option<TagSet>> {
        match self.client.get_bucket_tagging().bucket(name).send().await {
            Ok(output) => Ok(Some(
                output
                    .tag_set()
                    .iter()
                    .map(|tag| (tag.key().to_string(), tag.value().to_string()))
                    .collect(),
            )),
            // A bucket with no tags at all surfaces as NoSuchTagSet.
            Err(e) if e.meta().code() == Some("NoSuchTagSet") => Ok(None),
            Err(e) => Err(api_error("GetBucketTagging", DisplayErrorContext(&e))),
        }
    }

    async fn list_buckets(&self) -> Result<Vec<String>> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| api_error("ListBuckets", DisplayErrorContext(&e)))?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name())
            .map(str::to_string)
            .collect())
    }

    async fn allow_public_access(&self, name: &str) -> Result<()> {
        self.client
            .put_public_access_block()
            .bucket(name)
            .public_access_block_configuration(
                PublicAccessBlockConfiguration::builder()
                    .block_public_acls(false)
                    .ignore_public_acls(false)
                    .block_public_policy(false)
                    .restrict_public_buckets(false)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| api_error("PutPublicAccessBlock", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> Result<()> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| api_error("reading upload file", e))?;
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| api_error("PutObject", DisplayErrorContext(&e)))?;
        Ok(())
    }
}
