use thiserror::Error;

use crate::registry::Category;

// -----------------------------------------------------------------------------
// Error

/// Declaration-time structural errors.
///
/// These are the only recoverable failures in the crate, returned by the
/// `try_declare_*` methods on [`Registry`](crate::Registry); the plain
/// `declare_*` methods panic with the same diagnostic. Query-time misses are
/// never errors, they come back as sentinel values.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeclareError {
    #[error("type `{type_path}` has already been declared")]
    AlreadyDeclared { type_path: &'static str },

    #[error("type `{type_path}` must be declared before its {category}s")]
    NotDeclared {
        type_path: &'static str,
        category: Category,
    },

    #[error("base `{base_path}` of `{type_path}` is not reflected; declare the base first")]
    UnknownBase {
        type_path: &'static str,
        base_path: &'static str,
    },

    #[error("type `{type_path}` cannot declare itself as its own base")]
    SelfBase { type_path: &'static str },

    #[error("{category} table of `{type_path}` exceeded its capacity of {max} records")]
    CapacityOverflow {
        type_path: &'static str,
        category: Category,
        max: usize,
    },
}
