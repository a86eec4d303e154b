//! # hostwp-upmind
//!
//! Client library for the Upmind billing/provisioning REST API, used by
//! the HostWP back-office to mirror hosting plans, customers and orders
//! to the platform.
//!
//! ## What it provides
//!
//! - **Configuration profiles**: named credential sets
//!   ([`ApiProfile`]) with aggregate validation: every missing/invalid
//!   field is reported at once, not just the first.
//! - **An authenticated HTTP client** ([`UpmindClient`]) built from one
//!   validated profile; every request carries the bearer token, JSON
//!   content negotiation and the `X-Brand-ID` tenant header.
//! - **Bounded retry with linear backoff** ([`RetryPolicy`]) for
//!   transport failures and 5xx responses. Client errors (4xx) are never
//!   retried.
//! - **A typed service facade** for domain search/renewal, product CRUD,
//!   and client and order operations, with local input validation and
//!   response normalization into fixed shapes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hostwp_upmind::{ApiProfile, NewProfile, UpmindClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let profile = ApiProfile::from_new(NewProfile {
//!         label: "Production".to_string(),
//!         base_url: "https://api.upmind.io/api/v1".to_string(),
//!         token: "your-token".to_string(),
//!         brand_id: None, // defaults to "default"
//!         environment: Default::default(),
//!         timeout_secs: None,
//!         retry_attempts: None,
//!     })?;
//!
//!     let client = UpmindClient::from_profile(&profile)?;
//!     for product in client.list_products().await? {
//!         println!("{}: {} {}", product.id, product.name, product.price);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`ApiResult<T>`](ApiResult). Every failure mode
//! (local validation, 4xx, 5xx, transport faults, malformed bodies)
//! resolves to a structured [`UpmindError`]; nothing panics across the
//! public boundary. Transient errors ([`UpmindError::Network`],
//! [`UpmindError::Timeout`], [`UpmindError::Server`]) are retried
//! automatically with linear backoff.

mod api;
mod client;
mod config;
mod error;
mod retry;
mod types;
mod utils;

// Re-export error types
pub use error::{ApiResult, UpmindError};

// Re-export configuration types
pub use config::{
    ApiProfile, Environment, FieldViolation, NewProfile, ProfileUpdate, ProfileValidationError,
    DEFAULT_BRAND_ID, DEFAULT_RETRY_ATTEMPTS, DEFAULT_TIMEOUT_SECS,
};

// Re-export the client and retry policy
pub use client::{ApiBody, ApiPayload, UpmindClient};
pub use retry::RetryPolicy;

// Re-export resource types
pub use types::{
    ClientFilters, ClientPayload, ClientRecord, DomainSearchResult, Order, OrderFilters,
    OrderPayload, Product, ProductPayload, ProductUpdate,
};
