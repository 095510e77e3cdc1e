use alloc::boxed::Box;
use core::any::Any;

use crate::info::{Meta, Type};

// -----------------------------------------------------------------------------
// EnumValue

/// Conversion between an enum and its underlying value.
///
/// Stored enum metadata is erased to `i64`; this trait is the seam that maps
/// a concrete enum in and out of that representation. It is implemented by
/// [`reflect_enum!`](crate::reflect_enum), or by hand for foreign enums.
pub trait EnumValue: Copy + 'static {
    /// Returns the underlying value.
    fn to_value(self) -> i64;

    /// Recovers the enum from an underlying value, if it names a declared
    /// enumerator.
    fn from_value(value: i64) -> Option<Self>;
}

// -----------------------------------------------------------------------------
// GetEnumInfo

/// A trait which allows an enum to produce its own [`EnumInfo`] for
/// declaration into the [`Registry`](crate::Registry).
///
/// Implemented by [`reflect_enum!`](crate::reflect_enum); manual
/// implementations build the item list themselves:
///
/// ```
/// use tyref::{EnumInfo, EnumItem, EnumValue, GetEnumInfo, Meta};
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Mode { Read = 1, Write = 2 }
///
/// impl EnumValue for Mode {
///     fn to_value(self) -> i64 { self as i64 }
///     fn from_value(value: i64) -> Option<Self> {
///         match value {
///             1 => Some(Mode::Read),
///             2 => Some(Mode::Write),
///             _ => None,
///         }
///     }
/// }
///
/// impl GetEnumInfo for Mode {
///     fn get_enum_info() -> EnumInfo {
///         EnumInfo::new::<Self>(
///             [
///                 EnumItem::new("Read = 1", 1),
///                 EnumItem::new("Write = 2", 2).with_meta(Meta::new("w")),
///             ],
///             Meta::none(),
///         )
///     }
/// }
///
/// let info = Mode::get_enum_info();
/// assert_eq!(info.item_at(1).unwrap().name(), "Write");
/// ```
pub trait GetEnumInfo: EnumValue {
    /// Returns the [`EnumInfo`] for this enum.
    fn get_enum_info() -> EnumInfo;
}

// -----------------------------------------------------------------------------
// EnumItem

/// One enumerator: trimmed name, underlying value and optional meta.
#[derive(Debug)]
pub struct EnumItem {
    name: &'static str,
    value: i64,
    meta: Meta,
}

impl EnumItem {
    /// Creates an item from the enumerator's source text and value.
    ///
    /// `raw_name` may carry an explicit `= expr` suffix exactly as written in
    /// the declaration; it is trimmed down to the bare identifier.
    #[inline]
    pub fn new(raw_name: &'static str, value: i64) -> Self {
        Self {
            name: trim_enum_name(raw_name),
            value,
            meta: Meta::none(),
        }
    }

    /// Attaches per-item meta.
    #[inline]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Returns the bare enumerator name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the underlying value.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Returns the [`Meta`] payload.
    #[inline]
    pub const fn meta(&self) -> &Meta {
        &self.meta
    }
}

/// Recovers the bare enumerator identifier from its source token text,
/// discarding any ` = expr` suffix and surrounding whitespace.
///
/// # Examples
///
/// ```
/// use tyref::info::trim_enum_name;
///
/// assert_eq!(trim_enum_name("Red = 0xFF00"), "Red");
/// assert_eq!(trim_enum_name("Green"), "Green");
/// assert_eq!(trim_enum_name("  Blue  "), "Blue");
/// ```
pub fn trim_enum_name(raw: &'static str) -> &'static str {
    let name = match raw.find('=') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    name.trim()
}

// -----------------------------------------------------------------------------
// EnumInfo

/// The fixed metadata for one reflected enum.
///
/// Unlike class fields, which accumulate across many separate declarations,
/// enum metadata is built in a single burst from the full enumerator list.
/// Item order is declaration order and the list length never changes.
#[derive(Debug)]
pub struct EnumInfo {
    ty: Type,
    size: usize,
    items: Box<[EnumItem]>,
    meta: Meta,
}

impl EnumInfo {
    /// Creates the metadata for enum `E` from its full item list.
    pub fn new<E: EnumValue + Any>(items: impl Into<Box<[EnumItem]>>, meta: Meta) -> Self {
        Self {
            ty: Type::of::<E>(),
            size: size_of::<E>(),
            items: items.into(),
            meta,
        }
    }

    /// Returns the [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the short display name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.ty.name()
    }

    /// Returns the size of the enum in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the whole-enum [`Meta`] payload.
    #[inline]
    pub const fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Returns the items in declaration order.
    #[inline]
    pub fn items(&self) -> &[EnumItem] {
        &self.items
    }

    /// Returns the number of items.
    #[inline]
    pub fn item_len(&self) -> usize {
        self.items.len()
    }

    /// Returns the item at the given 0-based declaration position.
    #[inline]
    pub fn item_at(&self, index: usize) -> Option<&EnumItem> {
        self.items.get(index)
    }

    /// Visits the items in declaration order.
    ///
    /// Stops early and returns `false` the first time `f` returns `false`;
    /// otherwise returns `true` after visiting all items.
    pub fn each_item<F: FnMut(&EnumItem) -> bool>(&self, mut f: F) -> bool {
        for item in &self.items {
            if !f(item) {
                return false;
            }
        }
        true
    }

    /// Returns the declaration position of the first item with this value.
    pub fn index_of_value(&self, value: i64) -> Option<usize> {
        self.items.iter().position(|item| item.value == value)
    }

    /// Returns the declaration position of the first item with this name.
    ///
    /// The match is case-sensitive and exact.
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }

    /// Returns the name of the first item with this value, or `""` if the
    /// value names no declared enumerator.
    pub fn name_of(&self, value: i64) -> &'static str {
        match self.index_of_value(value) {
            Some(index) => self.items[index].name,
            None => "",
        }
    }

    /// Returns the value of the first item with this name, if present.
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.index_of_name(name).map(|index| self.items[index].value)
    }
}
