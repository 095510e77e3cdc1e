use core::any::Any;

use crate::info::{FieldInfo, Meta, Type};
use crate::registry::FactTable;

// -----------------------------------------------------------------------------
// ClassInfo

/// The single descriptor for one reflected class.
///
/// Holds the type's display name, size, optional base link and class-level
/// [`Meta`], plus the three per-class fact tables (fields, member types,
/// registered subclasses). One `ClassInfo` exists per owner type, created by
/// its declaration and immutable once the registry is
/// [sealed](crate::Registry::seal).
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
/// let info = registry.class_info::<Circle>().unwrap();
/// assert_eq!(info.name(), "Circle");
/// assert_eq!(info.size(), size_of::<Circle>());
/// assert!(info.base().unwrap().is::<Shape>());
/// ```
#[derive(Debug)]
pub struct ClassInfo {
    ty: Type,
    size: usize,
    base: Option<Type>,
    meta: Meta,
    fields: FactTable<FieldInfo>,
    member_types: FactTable<FieldInfo>,
    subclasses: FactTable<Type>,
}

impl ClassInfo {
    pub(crate) fn new<T: Any>(base: Option<Type>, meta: Meta) -> Self {
        Self {
            ty: Type::of::<T>(),
            size: size_of::<T>(),
            base,
            meta,
            fields: FactTable::new(),
            member_types: FactTable::new(),
            subclasses: FactTable::new(),
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

    /// Returns the full type path.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the size of the class in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the declared base type, or `None` for a root.
    #[inline]
    pub const fn base(&self) -> Option<&Type> {
        self.base.as_ref()
    }

    /// Returns `true` if this class declared a base.
    #[inline]
    pub const fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// Returns the class-level [`Meta`] payload.
    #[inline]
    pub const fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Returns the field table, in declaration order.
    #[inline]
    pub const fn fields(&self) -> &FactTable<FieldInfo> {
        &self.fields
    }

    /// Returns the member-type table, in declaration order.
    #[inline]
    pub const fn member_types(&self) -> &FactTable<FieldInfo> {
        &self.member_types
    }

    /// Returns the direct-subclass table, in declaration order.
    ///
    /// Entries appear here as a side effect of each subclass declaring this
    /// type as its base, never by this type's own declaration.
    #[inline]
    pub const fn subclasses(&self) -> &FactTable<Type> {
        &self.subclasses
    }

    /// Returns this class's own field with the given name, if present.
    ///
    /// The base chain is not searched; use
    /// [`Registry::each_field`](crate::Registry::each_field) for that.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns this class's own field at the given 1-based index, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    #[inline]
    pub(crate) fn fields_mut(&mut self) -> &mut FactTable<FieldInfo> {
        &mut self.fields
    }

    #[inline]
    pub(crate) fn member_types_mut(&mut self) -> &mut FactTable<FieldInfo> {
        &mut self.member_types
    }

    #[inline]
    pub(crate) fn subclasses_mut(&mut self) -> &mut FactTable<Type> {
        &mut self.subclasses
    }
}
