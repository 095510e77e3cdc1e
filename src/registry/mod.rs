//! The registry: declaration pass, sealing, and the query surface.
//!
//! ## Menu
//!
//! - [`Registry`]: The central store. Built by a one-time declaration pass
//!   (`declare_root`, `declare_subtype`, `declare_field`,
//!   `declare_member_type`, `declare_enum`), then [sealed](Registry::seal);
//!   afterwards it is read-only and every query is valid.
//!
//! - [`FactTable`]: The ordered, append-only record sequence for one
//!   (owner type, category) pair. 1-indexed, index 0 is the "not found"
//!   sentinel, capped at [`FactTable::MAX_RECORDS`] records.
//!
//! - [`Category`]: Discriminator separating the independent tables attached
//!   to one owner type, used in diagnostics.
//!
//! - [`DeclareError`]: Declaration-time structural errors. Query-time misses
//!   are never errors, they come back as sentinel values
//!   ([`INVALID_FIELD_INDEX`], `None`, `""`, a caller default).
//!
//! - [`RegistryArc`] (`std`): A shared `Arc<RwLock<Registry>>` handle for the
//!   process-wide, read-only-after-seal ownership model.
//!
//! ## Sealing
//!
//! Traversing a table is only meaningful once its final length is known, so
//! the registry refuses to serve queries before [`Registry::seal`] and
//! refuses declarations after it. Both violations are programming errors and
//! panic; there is no way to observe a half-built table.

// -----------------------------------------------------------------------------
// Modules

mod category;
mod error;
mod fact_table;
mod registry;
mod traverse;

// -----------------------------------------------------------------------------
// Exports

pub use category::Category;
pub use error::DeclareError;
pub use fact_table::FactTable;
pub use registry::Registry;
pub use traverse::INVALID_FIELD_INDEX;

#[cfg(feature = "std")]
pub use registry::RegistryArc;
