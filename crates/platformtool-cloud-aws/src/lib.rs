//! AWS provider for platformtool
//!
//! Implements the three capability traits from `platformtool-cloud` over
//! the AWS SDK: EC2 for compute, S3 for object storage, Route53 for DNS.
//!
//! Credentials and region come from the shared [`aws_config::SdkConfig`]
//! the CLI loads once; no ambient global session is touched here. SDK
//! failures map to [`CloudError::Api`] with the failing operation named.
//!
//! # Example
//!
//! ```ignore
//! let config = aws_config::load_from_env().await;
//! let dispatcher = Dispatcher::new(
//!     Arc::new(Ec2Compute::new(&config)),
//!     Arc::new(S3ObjectStore::new(&config)),
//!     Arc::new(Route53Dns::new(&config)),
//! );
//! ```

pub mod compute;
pub mod dns;
pub mod storage;

pub use compute::Ec2Compute;
pub use dns::Route53Dns;
pub use storage::S3ObjectStore;

use platformtool_cloud::CloudError;

/// Wrap an SDK failure with the operation that produced it.
pub(crate) fn api_error(operation: &str, err: impl std::fmt::Display) -> CloudError {
    CloudError::Api(format!("{operation}: {err}"))
}
