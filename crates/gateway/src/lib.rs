//! Lost and Found Gateway
//!
//! One method per item and claim operation. Each call receives the acting
//! [`Session`](core_kernel::Session) explicitly, checks it against the
//! visibility and lifecycle rules, and talks to storage only through the
//! `FoundItemPort` and `ClaimPort` traits.
//!
//! Mutations are computed on a loaded copy and persisted once every check has
//! passed, so a failed call leaves stored records untouched.
//!
//! ```rust,ignore
//! let gateway = LostFoundGateway::new(items, claims);
//! let claim = gateway.create_claim(&session, new_claim).await?;
//! ```

pub mod options;
pub mod service;

pub use options::ListOptions;
pub use service::LostFoundGateway;
