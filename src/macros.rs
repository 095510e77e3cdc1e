//! Declaration shorthand for classes and enums.

// -----------------------------------------------------------------------------
// reflect_class

/// Declares a class and its data fields in one statement.
///
/// The first form declares a root type, the second a subtype of an already
/// declared base. Both expand to the plain
/// [`Registry`](crate::Registry) declaration calls, so fields needing meta,
/// methods or member types can still be declared separately afterwards.
///
/// # Examples
///
/// ```
/// use tyref::{Registry, reflect_class};
///
/// struct Shape { name: String }
/// struct Circle { radius: f32 }
///
/// let mut registry = Registry::new();
/// reflect_class!(&mut registry, Shape { name });
/// reflect_class!(&mut registry, Circle: Shape { radius });
/// registry.seal();
///
/// assert_eq!(registry.field_index_of::<Circle>("radius"), 1);
/// assert!(registry.has_base::<Circle>());
/// ```
#[macro_export]
macro_rules! reflect_class {
    // The subtype form comes first so `Owner: Base` is never half-consumed
    // by the root form's type fragment.
    ($registry:expr, $owner:ty : $base:ty { $($field:ident),* $(,)? }) => {{
        let registry: &mut $crate::Registry = $registry;
        registry.declare_subtype::<$owner, $base>();
        $crate::reflect_class!(@fields registry, $owner, $($field),*);
    }};
    ($registry:expr, $owner:ty { $($field:ident),* $(,)? }) => {{
        let registry: &mut $crate::Registry = $registry;
        registry.declare_root::<$owner>();
        $crate::reflect_class!(@fields registry, $owner, $($field),*);
    }};
    (@fields $registry:ident, $owner:ty, $($field:ident),*) => {
        $(
            $registry.declare_field::<$owner>(
                stringify!($field),
                $crate::Accessor::field(
                    |owner: &$owner| &owner.$field,
                    |owner: &mut $owner| &mut owner.$field,
                ),
                $crate::Meta::none(),
            );
        )*
    };
}

// -----------------------------------------------------------------------------
// reflect_enum

/// Defines an enum together with its [`EnumValue`](crate::EnumValue) and
/// [`GetEnumInfo`](crate::GetEnumInfo) implementations.
///
/// The enum is emitted as written, plus `#[derive(Debug, Clone, Copy,
/// PartialEq, Eq)]`; extra attributes such as `#[repr(..)]` pass through. Declare the
/// result into a registry with
/// [`Registry::declare_enum`](crate::Registry::declare_enum).
///
/// Item names are recovered from the enumerator source text, so an explicit
/// `= value` never leaks into the stored name.
///
/// # Examples
///
/// ```
/// use tyref::{Registry, reflect_enum};
///
/// reflect_enum! {
///     pub enum Color {
///         Red = 0xFF00,
///         Green = 1,
///         Blue,
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.declare_enum::<Color>();
/// registry.seal();
///
/// assert_eq!(registry.enum_to_string(Color::Red), "Red");
/// assert_eq!(registry.string_to_enum("Green", Color::Blue), Color::Green);
/// ```
#[macro_export]
macro_rules! reflect_enum {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident $(= $value:expr)?),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($variant $(= $value)?),+
        }

        impl $crate::EnumValue for $name {
            #[inline]
            fn to_value(self) -> i64 {
                self as i64
            }

            fn from_value(value: i64) -> ::core::option::Option<Self> {
                $(
                    if value == Self::$variant as i64 {
                        return ::core::option::Option::Some(Self::$variant);
                    }
                )+
                ::core::option::Option::None
            }
        }

        impl $crate::GetEnumInfo for $name {
            fn get_enum_info() -> $crate::EnumInfo {
                $crate::EnumInfo::new::<Self>(
                    [$(
                        $crate::EnumItem::new(
                            stringify!($variant $(= $value)?),
                            Self::$variant as i64,
                        )
                    ),+],
                    $crate::Meta::none(),
                )
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::{EnumValue, GetEnumInfo, Registry};

    #[test]
    fn class_shorthand_matches_plain_declarations() {
        struct Shape {
            name: u32,
        }
        struct Circle {
            radius: f32,
            filled: bool,
        }

        let mut registry = Registry::new();
        reflect_class!(&mut registry, Shape { name });
        reflect_class!(&mut registry, Circle: Shape { radius, filled });
        registry.seal();

        let mut seen = Vec::new();
        registry.each_field::<Circle, _>(|field, level| {
            seen.push((field.name(), level));
            true
        });
        assert_eq!(seen, [("radius", 0), ("filled", 0), ("name", 1)]);

        let circle = Circle {
            radius: 2.5,
            filled: true,
        };
        let info = registry.class_info::<Circle>().unwrap();
        let radius = info.field("radius").unwrap();
        assert_eq!(
            radius.get_in(&circle).unwrap().downcast_ref::<f32>(),
            Some(&2.5)
        );
    }

    #[test]
    fn fieldless_class() {
        struct Marker;

        let mut registry = Registry::new();
        reflect_class!(&mut registry, Marker {});
        registry.seal();

        let info = registry.class_info::<Marker>().unwrap();
        assert!(info.fields().is_empty());
    }

    #[test]
    fn enum_definition_round_trips() {
        reflect_enum! {
            enum Color {
                Red = 0xFF00,
                Green = 1,
                Blue,
            }
        }

        assert_eq!(Color::Red.to_value(), 0xFF00);
        assert_eq!(Color::from_value(1), Some(Color::Green));
        assert_eq!(Color::from_value(77), None);

        // Explicit discriminants never leak into the names.
        let info = Color::get_enum_info();
        let names: Vec<_> = info.items().iter().map(|item| item.name()).collect();
        assert_eq!(names, ["Red", "Green", "Blue"]);
        assert_eq!(info.item_at(2).unwrap().value(), 2);
    }

    #[test]
    fn enum_declares_into_registry() {
        reflect_enum! {
            #[repr(i64)]
            pub(crate) enum Permission {
                Read = 0,
                Write = 1,
            }
        }

        let mut registry = Registry::new();
        registry.declare_enum::<Permission>();
        registry.seal();

        assert_eq!(registry.enum_to_string(Permission::Write), "Write");
        assert_eq!(
            registry.string_to_enum("Read", Permission::Write),
            Permission::Read
        );
        // Misses fall back softly.
        assert!(Permission::from_value(5).is_none());
        assert_eq!(
            registry.string_to_enum("Admin", Permission::Write),
            Permission::Write
        );
    }
}
