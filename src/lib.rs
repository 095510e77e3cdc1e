#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod macros;
mod map;

pub mod flags;
pub mod info;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use flags::Flags;
pub use info::{Accessor, ClassInfo, FieldInfo, Meta, Type};
pub use info::{EnumInfo, EnumItem, EnumValue, GetEnumInfo};
pub use registry::INVALID_FIELD_INDEX;
pub use registry::{Category, DeclareError, FactTable, Registry};

#[cfg(feature = "std")]
pub use registry::RegistryArc;
