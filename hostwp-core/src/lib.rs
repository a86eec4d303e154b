//! HostWP Core Library
//!
//! Provides core business logic for the HostWP back-office, including:
//! - API profile management (Profile Service)
//! - Plan/product synchronization (Sync Service)
//!
//! This library is platform-independent: the storage layer is abstracted
//! through traits so desktop and web backends can inject their own
//! implementations. All remote calls go through the `hostwp-upmind`
//! client library.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ProfileService, ServiceContext, SyncService};
pub use traits::{PlanRepository, ProfileStore};
