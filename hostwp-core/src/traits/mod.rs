//! Storage abstraction traits
//!
//! Platform layers (desktop app, web backend) implement these and inject
//! them through [`ServiceContext`](crate::services::ServiceContext).

mod plan_repository;
mod profile_store;

pub use plan_repository::PlanRepository;
pub use profile_store::{MemoryProfileStore, ProfileStore};
