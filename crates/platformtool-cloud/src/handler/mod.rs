//! Resource handlers, one per resource kind

pub mod compute;
pub mod dns;
pub mod storage;

pub use compute::{ComputeHandler, ControlOutcome};
pub use dns::DnsHandler;
pub use storage::StorageHandler;
