//! platformtool cloud dispatch
//!
//! This crate holds the ownership-gated action dispatcher behind the
//! `platformtool` CLI: it routes a `(resource kind, action)` pair to the
//! matching resource handler, stamps every created resource with a
//! provenance tag binding it to its creating user, and refuses destructive
//! or stateful actions on resources that do not carry that tag.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                platformtool CLI                  │
//! └─────────────────┬───────────────────────────────┘
//!                   │ ResourceRequest
//! ┌─────────────────▼───────────────────────────────┐
//! │             platformtool-cloud                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │               Dispatcher                  │   │
//! │  └──────┬───────────────┬──────────────┬────┘   │
//! │  ┌──────▼─────┐  ┌──────▼─────┐  ┌─────▼────┐  │
//! │  │  Compute   │  │  Storage   │  │   Dns    │  │
//! │  │  handler   │  │  handler   │  │  handler │  │
//! │  └──────┬─────┘  └──────┬─────┘  └─────┬────┘  │
//! │         └── ownership gate (re-verify) ──┘      │
//! └───────┬─────────────────┬──────────────┬────────┘
//!         │                 │              │
//!   ComputeClient   ObjectStoreClient   DnsClient
//!   (e.g. EC2)        (e.g. S3)       (e.g. Route53)
//! ```
//!
//! The provider boundary is the three capability traits in [`provider`];
//! `platformtool-cloud-aws` implements them over the AWS SDK, and the test
//! suite implements them in memory.
//!
//! Provenance is re-verified against the provider on every gated call, not
//! cached: one extra round-trip per action buys tolerance to out-of-band
//! tag changes between invocations.

pub mod dispatch;
pub mod error;
pub mod gate;
pub mod handler;
pub mod provider;
pub mod request;
pub mod tags;

// Re-exports
pub use dispatch::{Dispatcher, Outcome};
pub use error::{CloudError, Result};
pub use handler::{ComputeHandler, DnsHandler, StorageHandler};
pub use provider::{
    ComputeClient, DnsClient, LaunchSpec, ObjectStoreClient, RecordAction, RecordChange,
    VpcBinding, ZoneSpec,
};
pub use request::{Action, ResourceKind, ResourceRequest};
pub use tags::{Tag, TagSet};
