//! Markdown formatting for models, collections and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes are formatted through the newtype
//! wrappers below so the same record can be shown differently in a list, a
//! detail view or a confirmation.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (plans, tasks)  │───▶│ (Plans, Create- │───▶│  (terminal via  │
//! │                 │    │  Result, ...)   │    │   termimad)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: `Plans` and `TaskInstances`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: timestamp formatting
//! - [`models`]: Display implementations for models, reports and checklists
//!
//! ```rust
//! use upkeep_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Sweep finished".to_string());
//! assert!(status.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Plans, TaskInstances};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
