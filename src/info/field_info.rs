use alloc::boxed::Box;
use core::any::Any;

use crate::info::Type;

// -----------------------------------------------------------------------------
// Meta

/// Optional caller-supplied auxiliary data attached to a record.
///
/// Defaults to [`Meta::none`]; consumers read it back with a typed downcast.
///
/// # Examples
///
/// ```
/// use tyref::Meta;
///
/// let meta = Meta::new("tooltip: radius in meters");
/// assert_eq!(meta.get::<&str>(), Some(&"tooltip: radius in meters"));
/// assert_eq!(meta.get::<u32>(), None);
/// assert!(Meta::none().is_none());
/// ```
#[derive(Default)]
pub struct Meta(Option<Box<dyn Any + Send + Sync>>);

impl Meta {
    /// The empty marker.
    #[inline]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Wraps a caller-supplied value.
    #[inline]
    pub fn new<M: Any + Send + Sync>(value: M) -> Self {
        Self(Some(Box::new(value)))
    }

    /// Returns `true` if no data was supplied.
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the payload as `M`, if present and of that type.
    #[inline]
    pub fn get<M: Any>(&self) -> Option<&M> {
        self.0.as_deref().and_then(|meta| meta.downcast_ref())
    }
}

impl core::fmt::Debug for Meta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.0 {
            Some(_) => f.write_str("Meta(..)"),
            None => f.write_str("Meta(None)"),
        }
    }
}

// -----------------------------------------------------------------------------
// Accessor

/// Member access stored in a [`FieldInfo`] record.
///
/// The three variants mirror the three kinds of member a class can declare:
/// data fields, methods, and nested member types.
pub enum Accessor {
    /// An erased getter pair for a data field.
    Field(FieldPtr),
    /// A downcastable pointer to a method.
    Method(MethodPtr),
    /// A type tag for a nested member type.
    MemberType(Type),
}

impl Accessor {
    /// Creates a field accessor from a pair of plain projection functions.
    ///
    /// # Examples
    ///
    /// ```
    /// use tyref::Accessor;
    ///
    /// struct Circle { radius: f32 }
    ///
    /// let accessor = Accessor::field(
    ///     |c: &Circle| &c.radius,
    ///     |c: &mut Circle| &mut c.radius,
    /// );
    ///
    /// let circle = Circle { radius: 2.0 };
    /// let ptr = accessor.as_field().unwrap();
    /// assert_eq!(ptr.get(&circle).unwrap().downcast_ref::<f32>(), Some(&2.0));
    /// ```
    pub fn field<O: Any, T: Any>(get: fn(&O) -> &T, get_mut: fn(&mut O) -> &mut T) -> Self {
        Self::Field(FieldPtr {
            get: Box::new(move |owner| owner.downcast_ref::<O>().map(|o| get(o) as &dyn Any)),
            get_mut: Box::new(move |owner| {
                owner.downcast_mut::<O>().map(|o| get_mut(o) as &mut dyn Any)
            }),
        })
    }

    /// Creates a method accessor from a function pointer.
    ///
    /// Overloaded-name disambiguation is an explicit cast at the declaration
    /// site, e.g. `Accessor::method(Circle::scaled as fn(&Circle, f32) -> f32)`.
    #[inline]
    pub fn method<F: Any + Send + Sync>(f: F) -> Self {
        Self::Method(MethodPtr(Box::new(f)))
    }

    /// Creates a member-type tag for `M`.
    #[inline]
    pub fn member_type<M: Any>() -> Self {
        Self::MemberType(Type::of::<M>())
    }

    /// Returns the field pointer, if this is a field accessor.
    #[inline]
    pub fn as_field(&self) -> Option<&FieldPtr> {
        match self {
            Self::Field(ptr) => Some(ptr),
            _ => None,
        }
    }

    /// Returns the method pointer, if this is a method accessor.
    #[inline]
    pub fn as_method(&self) -> Option<&MethodPtr> {
        match self {
            Self::Method(ptr) => Some(ptr),
            _ => None,
        }
    }

    /// Returns the member type tag, if this is a member-type accessor.
    #[inline]
    pub fn as_member_type(&self) -> Option<&Type> {
        match self {
            Self::MemberType(ty) => Some(ty),
            _ => None,
        }
    }
}

impl core::fmt::Debug for Accessor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Field(_) => f.write_str("Accessor::Field"),
            Self::Method(_) => f.write_str("Accessor::Method"),
            Self::MemberType(ty) => f.debug_tuple("Accessor::MemberType").field(ty).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldPtr

/// A type-erased getter pair for one data field.
pub struct FieldPtr {
    get: Box<dyn Fn(&dyn Any) -> Option<&dyn Any> + Send + Sync>,
    get_mut: Box<dyn Fn(&mut dyn Any) -> Option<&mut dyn Any> + Send + Sync>,
}

impl FieldPtr {
    /// Projects the field out of `owner`.
    ///
    /// Returns `None` if `owner` is not the enclosing class.
    #[inline]
    pub fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.get)(owner)
    }

    /// Projects the field mutably out of `owner`.
    ///
    /// Returns `None` if `owner` is not the enclosing class.
    #[inline]
    pub fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.get_mut)(owner)
    }
}

// -----------------------------------------------------------------------------
// MethodPtr

/// A type-erased pointer to a method.
///
/// Consumers recover the callable by downcasting to the exact function
/// pointer type it was declared with.
pub struct MethodPtr(Box<dyn Any + Send + Sync>);

impl MethodPtr {
    /// Returns the stored callable as `F`, if it was declared with that type.
    #[inline]
    pub fn downcast_ref<F: Any>(&self) -> Option<&F> {
        self.0.downcast_ref()
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// One record in a field or member-type table.
///
/// # Examples
///
/// ```
/// use tyref::{Registry, reflect_class};
///
/// struct Circle { radius: f32 }
///
/// let mut registry = Registry::new();
/// reflect_class!(&mut registry, Circle { radius });
/// registry.seal();
///
/// let info = registry.class_info::<Circle>().unwrap();
/// let field = info.field("radius").unwrap();
///
/// assert_eq!(field.index(), 1);
/// let circle = Circle { radius: 1.5 };
/// assert_eq!(field.get_in(&circle).unwrap().downcast_ref::<f32>(), Some(&1.5));
/// ```
#[derive(Debug)]
pub struct FieldInfo {
    index: usize,
    name: &'static str,
    accessor: Accessor,
    meta: Meta,
}

impl FieldInfo {
    #[inline]
    pub(crate) fn new(index: usize, name: &'static str, accessor: Accessor, meta: Meta) -> Self {
        Self {
            index,
            name,
            accessor,
            meta,
        }
    }

    /// Returns the 1-based index of this record within its own table.
    ///
    /// Index 0 is reserved as the
    /// ["not found" sentinel](crate::INVALID_FIELD_INDEX).
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the declared name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`Accessor`].
    #[inline]
    pub const fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    /// Returns the [`Meta`] payload.
    #[inline]
    pub const fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Projects a data field out of `owner`.
    ///
    /// Returns `None` for method and member-type records, or if `owner` is
    /// not the enclosing class.
    #[inline]
    pub fn get_in<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        self.accessor.as_field()?.get(owner)
    }

    /// Projects a data field mutably out of `owner`.
    ///
    /// Returns `None` for method and member-type records, or if `owner` is
    /// not the enclosing class.
    #[inline]
    pub fn get_in_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.accessor.as_field()?.get_mut(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        value: u32,
    }

    impl Sample {
        fn doubled(&self) -> u32 {
            self.value * 2
        }
    }

    #[test]
    fn field_accessor_roundtrip() {
        let field = FieldInfo::new(
            1,
            "value",
            Accessor::field(|s: &Sample| &s.value, |s: &mut Sample| &mut s.value),
            Meta::none(),
        );

        let mut sample = Sample { value: 7 };
        assert_eq!(
            field.get_in(&sample).unwrap().downcast_ref::<u32>(),
            Some(&7)
        );

        *field
            .get_in_mut(&mut sample)
            .unwrap()
            .downcast_mut::<u32>()
            .unwrap() = 9;
        assert_eq!(sample.value, 9);

        // A foreign owner misses softly.
        let other = 3u8;
        assert!(field.get_in(&other).is_none());
    }

    #[test]
    fn method_accessor_downcast() {
        let accessor = Accessor::method(Sample::doubled as fn(&Sample) -> u32);
        let method = accessor.as_method().unwrap();

        let f = method.downcast_ref::<fn(&Sample) -> u32>().unwrap();
        assert_eq!(f(&Sample { value: 21 }), 42);

        // Wrong signature misses softly.
        assert!(method.downcast_ref::<fn(&Sample) -> u64>().is_none());
    }

    #[test]
    fn meta_payload() {
        let field = FieldInfo::new(
            2,
            "value",
            Accessor::member_type::<u32>(),
            Meta::new(0xFFu32),
        );
        assert_eq!(field.meta().get::<u32>(), Some(&0xFF));
        assert!(field.accessor().as_member_type().unwrap().is::<u32>());
        assert!(field.get_in(&1u8).is_none());
    }
}
