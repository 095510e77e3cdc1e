use core::any::{Any, TypeId};

use crate::info::{ClassInfo, FieldInfo};
use crate::registry::Registry;

// -----------------------------------------------------------------------------
// Traversal

/// The "no such field" sentinel returned by
/// [`Registry::field_index_of`].
///
/// Record indices are 1-based, so 0 never addresses a record.
pub const INVALID_FIELD_INDEX: usize = 0;

/// Base-chain and subclass-tree traversal.
///
/// Every visitor here follows the same early-stop protocol as
/// [`FactTable::for_each`](crate::FactTable::for_each): the callback returns
/// `true` to continue, the traversal returns `false` as soon as a callback
/// said stop, and a type with nothing to visit (including an unreflected one)
/// is a vacuous success. Traversal is read-only and idempotent.
impl Registry {
    /// Visits the fields of `T` and of every class on its base chain.
    ///
    /// The starting class's own fields come first at level 0, then each
    /// ancestor's fields with the level counting the distance up the chain.
    /// Within one class, fields appear in declaration order.
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
    /// let mut seen = Vec::new();
    /// registry.each_field::<Circle, _>(|field, level| {
    ///     seen.push((field.name(), level));
    ///     true
    /// });
    /// assert_eq!(seen, [("radius", 0), ("name", 1)]);
    /// ```
    #[track_caller]
    #[inline]
    pub fn each_field<T, F>(&self, f: F) -> bool
    where
        T: Any,
        F: FnMut(&FieldInfo, usize) -> bool,
    {
        self.each_field_by_id(TypeId::of::<T>(), f)
    }

    /// Visits the fields of the type with the given [`TypeId`] and of every
    /// class on its base chain.
    #[track_caller]
    pub fn each_field_by_id<F>(&self, type_id: TypeId, mut f: F) -> bool
    where
        F: FnMut(&FieldInfo, usize) -> bool,
    {
        self.assert_sealed("each_field");
        self.walk_base_chain(type_id, |info, level| {
            info.fields().for_each(|field| f(field, level))
        })
    }

    /// Visits the member types of `T` and of every class on its base chain,
    /// with the same ordering and levels as [`each_field`](Self::each_field).
    #[track_caller]
    #[inline]
    pub fn each_member_type<T, F>(&self, f: F) -> bool
    where
        T: Any,
        F: FnMut(&FieldInfo, usize) -> bool,
    {
        self.each_member_type_by_id(TypeId::of::<T>(), f)
    }

    /// Visits the member types of the type with the given [`TypeId`] and of
    /// every class on its base chain.
    #[track_caller]
    pub fn each_member_type_by_id<F>(&self, type_id: TypeId, mut f: F) -> bool
    where
        F: FnMut(&FieldInfo, usize) -> bool,
    {
        self.assert_sealed("each_member_type");
        self.walk_base_chain(type_id, |info, level| {
            info.member_types().for_each(|field| f(field, level))
        })
    }

    /// Visits every registered subclass of `T`, transitively, in pre-order.
    ///
    /// A subclass is visited before its own subclasses; siblings appear in
    /// declaration order. The level is the distance below `T`, so direct
    /// subclasses come at level 0. `T` itself is not visited.
    ///
    /// ```
    /// use tyref::{Registry, reflect_class};
    ///
    /// struct Shape { name: String }
    /// struct Circle { radius: f32 }
    /// struct Square { side: f32 }
    ///
    /// let mut registry = Registry::new();
    /// reflect_class!(&mut registry, Shape { name });
    /// reflect_class!(&mut registry, Circle: Shape { radius });
    /// reflect_class!(&mut registry, Square: Shape { side });
    /// registry.seal();
    ///
    /// let mut seen = Vec::new();
    /// registry.each_subclass::<Shape, _>(|info, level| {
    ///     seen.push((info.name(), level));
    ///     true
    /// });
    /// assert_eq!(seen, [("Circle", 0), ("Square", 0)]);
    /// ```
    #[track_caller]
    #[inline]
    pub fn each_subclass<T, F>(&self, f: F) -> bool
    where
        T: Any,
        F: FnMut(&ClassInfo, usize) -> bool,
    {
        self.each_subclass_by_id(TypeId::of::<T>(), f)
    }

    /// Visits every registered subclass of the type with the given
    /// [`TypeId`], transitively, in pre-order.
    #[track_caller]
    pub fn each_subclass_by_id<F>(&self, type_id: TypeId, mut f: F) -> bool
    where
        F: FnMut(&ClassInfo, usize) -> bool,
    {
        self.assert_sealed("each_subclass");
        self.subclass_walk(type_id, &mut f, 0)
    }

    /// Returns the 1-based index of the first field named `name` on `T` or
    /// its base chain, starting at `T` itself.
    ///
    /// The index addresses the owning class's own field table. Returns
    /// [`INVALID_FIELD_INDEX`] when no class on the chain declares the name.
    #[track_caller]
    #[inline]
    pub fn field_index_of<T: Any>(&self, name: &str) -> usize {
        self.field_index_of_by_id(TypeId::of::<T>(), name)
    }

    /// Returns the 1-based index of the first field named `name` on the base
    /// chain of the type with the given [`TypeId`].
    #[track_caller]
    pub fn field_index_of_by_id(&self, type_id: TypeId, name: &str) -> usize {
        self.assert_sealed("field_index_of");
        let mut index = INVALID_FIELD_INDEX;
        self.each_field_by_id(type_id, |field, _| {
            if field.name() == name {
                index = field.index();
                return false;
            }
            true
        });
        index
    }

    /// Returns `T`'s own field at the given 1-based index.
    ///
    /// Index 0 (the sentinel), out-of-range indices and unreflected types
    /// return `None`; the base chain is not consulted.
    #[track_caller]
    #[inline]
    pub fn field_at<T: Any>(&self, index: usize) -> Option<&FieldInfo> {
        self.field_at_by_id(TypeId::of::<T>(), index)
    }

    /// Returns the own field at the given 1-based index of the type with the
    /// given [`TypeId`].
    #[track_caller]
    pub fn field_at_by_id(&self, type_id: TypeId, index: usize) -> Option<&FieldInfo> {
        self.assert_sealed("field_at");
        self.classes.get(&type_id)?.field_at(index)
    }

    // -------------------------------------------------------------------------
    // Walkers

    fn walk_base_chain<F>(&self, start: TypeId, mut f: F) -> bool
    where
        F: FnMut(&ClassInfo, usize) -> bool,
    {
        let mut type_id = start;
        let mut level = 0;
        loop {
            // An unreflected start is a vacuous success; a dangling base
            // cannot occur, declarations check the base first.
            let Some(info) = self.classes.get(&type_id) else {
                return true;
            };
            if !f(info, level) {
                return false;
            }
            match info.base() {
                Some(base) => {
                    type_id = base.id();
                    level += 1;
                }
                None => return true,
            }
        }
    }

    fn subclass_walk<F>(&self, type_id: TypeId, f: &mut F, level: usize) -> bool
    where
        F: FnMut(&ClassInfo, usize) -> bool,
    {
        let Some(info) = self.classes.get(&type_id) else {
            return true;
        };
        info.subclasses().for_each(|child| {
            let child_id = child.id();
            match self.classes.get(&child_id) {
                Some(child_info) => {
                    f(child_info, level) && self.subclass_walk(child_id, f, level + 1)
                }
                None => true,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::info::{Accessor, Meta};

    struct Shape {
        name: u32,
    }
    struct Circle {
        radius: f32,
    }
    struct Square;

    fn shapes() -> Registry {
        let mut registry = Registry::new();
        registry.declare_root::<Shape>();
        registry.declare_field::<Shape>(
            "name",
            Accessor::field(|s: &Shape| &s.name, |s: &mut Shape| &mut s.name),
            Meta::none(),
        );
        registry.declare_subtype::<Circle, Shape>();
        registry.declare_field::<Circle>(
            "radius",
            Accessor::field(|c: &Circle| &c.radius, |c: &mut Circle| &mut c.radius),
            Meta::none(),
        );
        registry.declare_subtype::<Square, Shape>();
        registry.seal();
        registry
    }

    #[test]
    fn fields_walk_derived_then_base() {
        let registry = shapes();

        let mut seen = Vec::new();
        assert!(registry.each_field::<Circle, _>(|field, level| {
            seen.push((field.name(), level));
            true
        }));
        assert_eq!(seen, [("radius", 0), ("name", 1)]);

        // A root only sees its own fields.
        let mut seen = Vec::new();
        assert!(registry.each_field::<Shape, _>(|field, level| {
            seen.push((field.name(), level));
            true
        }));
        assert_eq!(seen, [("name", 0)]);
    }

    #[test]
    fn unreflected_type_is_vacuous() {
        let registry = shapes();
        assert!(registry.each_field::<u32, _>(|_, _| false));
        assert!(registry.each_subclass::<u32, _>(|_, _| false));
        assert_eq!(registry.field_index_of::<u32>("name"), INVALID_FIELD_INDEX);
    }

    #[test]
    fn subclasses_walk_in_pre_order() {
        struct A;
        struct B;
        struct C;
        struct D;

        let mut registry = Registry::new();
        registry.declare_root::<A>();
        registry.declare_subtype::<B, A>();
        registry.declare_subtype::<C, A>();
        registry.declare_subtype::<D, B>();
        registry.seal();

        let mut seen = Vec::new();
        assert!(registry.each_subclass::<A, _>(|info, level| {
            seen.push((info.name(), level));
            true
        }));
        assert_eq!(seen, [("B", 0), ("D", 1), ("C", 0)]);

        // A leaf has nothing to visit.
        assert!(registry.each_subclass::<D, _>(|_, _| false));
    }

    #[test]
    fn early_stop_propagates() {
        let registry = shapes();

        let mut count = 0;
        assert!(!registry.each_field::<Circle, _>(|_, _| {
            count += 1;
            false
        }));
        assert_eq!(count, 1);

        let mut count = 0;
        assert!(!registry.each_subclass::<Shape, _>(|_, _| {
            count += 1;
            false
        }));
        assert_eq!(count, 1);
    }

    #[test]
    fn field_index_lookup() {
        let registry = shapes();

        // Chain search starts at the derived class; the index addresses the
        // owning class's own table.
        assert_eq!(registry.field_index_of::<Circle>("radius"), 1);
        assert_eq!(registry.field_index_of::<Circle>("name"), 1);
        assert_eq!(
            registry.field_index_of::<Circle>("area"),
            INVALID_FIELD_INDEX
        );

        assert_eq!(registry.field_at::<Circle>(1).unwrap().name(), "radius");
        assert!(registry.field_at::<Circle>(0).is_none());
        assert!(registry.field_at::<Circle>(2).is_none());
        assert!(registry.field_at::<Square>(1).is_none());
    }

    #[test]
    fn traversal_is_idempotent() {
        let registry = shapes();

        let mut first = Vec::new();
        registry.each_field::<Circle, _>(|field, level| {
            first.push((field.name(), level));
            true
        });
        let mut second = Vec::new();
        registry.each_field::<Circle, _>(|field, level| {
            second.push((field.name(), level));
            true
        });
        assert_eq!(first, second);
    }

    #[test]
    fn member_types_walk_the_chain() {
        struct Base;
        struct Derived;
        struct BaseConfig;
        struct DerivedConfig;

        let mut registry = Registry::new();
        registry.declare_root::<Base>();
        registry.declare_member_type::<Base, BaseConfig>(Meta::none());
        registry.declare_subtype::<Derived, Base>();
        registry.declare_member_type::<Derived, DerivedConfig>(Meta::none());
        registry.seal();

        let mut seen = Vec::new();
        assert!(registry.each_member_type::<Derived, _>(|record, level| {
            seen.push((record.name(), level));
            true
        }));
        assert_eq!(seen, [("DerivedConfig", 0), ("BaseConfig", 1)]);
    }
}
