//! Metadata records for reflected types.
//!
//! ## Menu
//!
//! - [`Type`]: A `TypeId` paired with the type's path and a derived short name.
//!
//! - [`ClassInfo`]: The single descriptor for one reflected class: name,
//!   size, optional base link, meta, and its field / member-type / subclass
//!   tables.
//!
//! - [`FieldInfo`]: One record in a field or member-type table, holding a
//!   1-based index, the declared name, an [`Accessor`] and a [`Meta`] payload.
//!     - [`Accessor`]: member access as an erased getter pair, a downcastable
//!       method pointer, or a member-type tag.
//!     - [`Meta`]: optional caller-supplied auxiliary data.
//!
//! - [`EnumInfo`]: The fixed item list for one reflected enum.
//!     - [`EnumItem`]: One enumerator with trimmed name, underlying value
//!       and meta.
//!     - [`EnumValue`]: Conversion between an enum and its underlying value.
//!     - [`GetEnumInfo`]: A trait letting a type produce its own [`EnumInfo`],
//!       implemented by [`reflect_enum!`](crate::reflect_enum).

// -----------------------------------------------------------------------------
// Modules

mod class_info;
mod enum_info;
mod field_info;
mod ty;

// -----------------------------------------------------------------------------
// Exports

pub use class_info::ClassInfo;
pub use enum_info::{EnumInfo, EnumItem, EnumValue, GetEnumInfo, trim_enum_name};
pub use field_info::{Accessor, FieldInfo, FieldPtr, Meta, MethodPtr};
pub use ty::Type;
