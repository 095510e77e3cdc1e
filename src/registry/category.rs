use core::fmt;

// -----------------------------------------------------------------------------
// Category

/// Discriminator separating the independent fact tables attached to one
/// owner type.
///
/// The tables themselves are separate fields on
/// [`ClassInfo`](crate::ClassInfo) and [`EnumInfo`](crate::EnumInfo); the
/// category value appears in diagnostics and
/// [`DeclareError`](crate::DeclareError) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Data fields and methods of a class.
    Field,
    /// Nested member types of a class.
    MemberType,
    /// Registered direct subclasses of a class.
    Subclass,
    /// The enumerators of an enum.
    EnumItem,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Field => "field",
            Self::MemberType => "member type",
            Self::Subclass => "subclass",
            Self::EnumItem => "enum item",
        };
        f.write_str(name)
    }
}
