use core::any::{Any, TypeId};

use crate::info::{Accessor, ClassInfo, EnumInfo, EnumValue, FieldInfo, GetEnumInfo, Meta, Type};
use crate::map::{HashMap, HashSet, TypeIdMap};
use crate::registry::fact_table::FactTable;
use crate::registry::{Category, DeclareError};

// -----------------------------------------------------------------------------
// Registry

/// The central store for reflection metadata.
///
/// A registry goes through exactly two phases:
///
/// 1. **Declaration pass**: a single-threaded burst of `declare_*` calls
///    establishing class metadata, field and member-type records, subclass
///    links and enum metadata. Declaration order is preserved everywhere.
/// 2. **Sealed**: after [`seal`](Self::seal) the registry is read-only and
///    the whole query surface becomes valid.
///
/// Queries before sealing and declarations after it are programming errors
/// and panic; structural declaration mistakes (unknown base, capacity
/// overflow, double declaration) are [`DeclareError`]s.
///
/// # Example
///
/// ```
/// use tyref::{Accessor, Meta, Registry};
///
/// struct Shape { name: String }
/// struct Circle { radius: f32 }
///
/// let mut registry = Registry::new();
/// registry.declare_root::<Shape>();
/// registry.declare_field::<Shape>(
///     "name",
///     Accessor::field(|s: &Shape| &s.name, |s: &mut Shape| &mut s.name),
///     Meta::none(),
/// );
/// registry.declare_subtype::<Circle, Shape>();
/// registry.seal();
///
/// assert!(registry.is_reflected::<Circle>());
/// assert!(registry.has_base::<Circle>());
/// assert!(!registry.has_base::<Shape>());
/// assert!(!registry.is_reflected::<u32>());
/// ```
pub struct Registry {
    pub(crate) classes: TypeIdMap<ClassInfo>,
    enums: TypeIdMap<EnumInfo>,
    name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
    sealed: bool,
}

impl Default for Registry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty, unsealed registry.
    pub const fn new() -> Self {
        Self {
            classes: TypeIdMap::new(),
            enums: TypeIdMap::new(),
            name_to_id: HashMap::with_hasher(crate::map::FixedHashState),
            ambiguous_names: HashSet::with_hasher(crate::map::FixedHashState),
            sealed: false,
        }
    }

    // -------------------------------------------------------------------------
    // Sealing

    /// Ends the declaration pass.
    ///
    /// After sealing, every query is valid and every further declaration is a
    /// programming error. Sealing twice is a no-op.
    pub fn seal(&mut self) {
        if !self.sealed {
            self.sealed = true;
            log::debug!(
                "sealed registry: {} classes, {} enums",
                self.classes.len(),
                self.enums.len()
            );
        }
    }

    /// Returns `true` once [`seal`](Self::seal) has been called.
    #[inline]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    #[track_caller]
    pub(crate) fn assert_sealed(&self, operation: &str) {
        assert!(
            self.sealed,
            "called `Registry::{operation}` before the registry was sealed"
        );
    }

    #[track_caller]
    fn assert_unsealed(&self, operation: &str) {
        assert!(
            !self.sealed,
            "called `Registry::{operation}` after the registry was sealed"
        );
    }

    // -------------------------------------------------------------------------
    // Declarations

    /// Declares `T` as a reflected root type with no base.
    ///
    /// Its field, member-type and subclass tables start empty; the subclass
    /// table fills up as a side effect of later
    /// [`declare_subtype`](Self::declare_subtype) calls naming `T` as base.
    ///
    /// # Panics
    ///
    /// Panics on a [`DeclareError`] or if the registry is sealed; see
    /// [`try_declare_root`](Self::try_declare_root).
    #[track_caller]
    pub fn declare_root<T: Any>(&mut self) {
        self.declare_root_with_meta::<T>(Meta::none());
    }

    /// Declares `T` as a reflected root type with class-level meta.
    ///
    /// # Panics
    ///
    /// Panics on a [`DeclareError`] or if the registry is sealed.
    #[track_caller]
    pub fn declare_root_with_meta<T: Any>(&mut self, meta: Meta) {
        if let Err(error) = self.try_declare_root_with_meta::<T>(meta) {
            panic!("{error}");
        }
    }

    /// Declares `T` as a reflected root type, reporting structural errors.
    ///
    /// # Panics
    ///
    /// Panics if the registry is sealed (a programming error, unlike the
    /// recoverable [`DeclareError`] cases).
    #[track_caller]
    pub fn try_declare_root<T: Any>(&mut self) -> Result<(), DeclareError> {
        self.try_declare_root_with_meta::<T>(Meta::none())
    }

    /// Declares `T` as a reflected root type with class-level meta,
    /// reporting structural errors.
    ///
    /// # Panics
    ///
    /// Panics if the registry is sealed.
    #[track_caller]
    pub fn try_declare_root_with_meta<T: Any>(&mut self, meta: Meta) -> Result<(), DeclareError> {
        self.assert_unsealed("declare_root");
        self.insert_class(ClassInfo::new::<T>(None, meta))
    }

    /// Declares `T` as a reflected subtype of `B`.
    ///
    /// As a side effect, `T` is appended to `B`'s subclass table; the base
    /// learns about its subclasses purely through their declarations.
    ///
    /// `B` must already be reflected; declaration order therefore follows the
    /// inheritance hierarchy root-first.
    ///
    /// # Panics
    ///
    /// Panics on a [`DeclareError`] or if the registry is sealed; see
    /// [`try_declare_subtype`](Self::try_declare_subtype).
    #[track_caller]
    pub fn declare_subtype<T: Any, B: Any>(&mut self) {
        self.declare_subtype_with_meta::<T, B>(Meta::none());
    }

    /// Declares `T` as a reflected subtype of `B` with class-level meta.
    ///
    /// # Panics
    ///
    /// Panics on a [`DeclareError`] or if the registry is sealed.
    #[track_caller]
    pub fn declare_subtype_with_meta<T: Any, B: Any>(&mut self, meta: Meta) {
        if let Err(error) = self.try_declare_subtype_with_meta::<T, B>(meta) {
            panic!("{error}");
        }
    }

    /// Declares `T` as a reflected subtype of `B`, reporting structural
    /// errors.
    ///
    /// # Panics
    ///
    /// Panics if the registry is sealed.
    #[track_caller]
    pub fn try_declare_subtype<T: Any, B: Any>(&mut self) -> Result<(), DeclareError> {
        self.try_declare_subtype_with_meta::<T, B>(Meta::none())
    }

    /// Declares `T` as a reflected subtype of `B` with class-level meta,
    /// reporting structural errors.
    ///
    /// A failed declaration leaves no trace: the base's subclass table is
    /// capacity-checked before the subtype is inserted, so an `Err` never
    /// leaves a subtype declared but missing from its base's table.
    ///
    /// # Panics
    ///
    /// Panics if the registry is sealed.
    #[track_caller]
    pub fn try_declare_subtype_with_meta<T: Any, B: Any>(
        &mut self,
        meta: Meta,
    ) -> Result<(), DeclareError> {
        self.assert_unsealed("declare_subtype");

        let ty = Type::of::<T>();
        let base = Type::of::<B>();

        if ty.id() == base.id() {
            return Err(DeclareError::SelfBase {
                type_path: ty.path(),
            });
        }
        let Some(base_info) = self.classes.get(&base.id()) else {
            return Err(DeclareError::UnknownBase {
                type_path: ty.path(),
                base_path: base.path(),
            });
        };
        if base_info.subclasses().len() >= FactTable::<Type>::MAX_RECORDS {
            return Err(DeclareError::CapacityOverflow {
                type_path: base.path(),
                category: Category::Subclass,
                max: FactTable::<Type>::MAX_RECORDS,
            });
        }

        self.insert_class(ClassInfo::new::<T>(Some(base), meta))?;

        if let Some(base_info) = self.classes.get_mut(&base.id()) {
            // Cannot overflow, capacity was checked above.
            let _ = base_info.subclasses_mut().push(ty);
        }

        log::trace!("registered `{}` as subclass of `{}`", ty.path(), base.path());
        Ok(())
    }

    /// Appends one field record to `T`'s field table.
    ///
    /// Methods are fields with an [`Accessor::method`] value; an overloaded
    /// name can be declared once per signature.
    ///
    /// # Panics
    ///
    /// Panics on a [`DeclareError`] or if the registry is sealed; see
    /// [`try_declare_field`](Self::try_declare_field).
    #[track_caller]
    pub fn declare_field<T: Any>(&mut self, name: &'static str, accessor: Accessor, meta: Meta) {
        if let Err(error) = self.try_declare_field::<T>(name, accessor, meta) {
            panic!("{error}");
        }
    }

    /// Appends one field record to `T`'s field table, reporting structural
    /// errors.
    ///
    /// # Panics
    ///
    /// Panics if the registry is sealed.
    #[track_caller]
    pub fn try_declare_field<T: Any>(
        &mut self,
        name: &'static str,
        accessor: Accessor,
        meta: Meta,
    ) -> Result<(), DeclareError> {
        self.assert_unsealed("declare_field");
        self.push_record::<T>(Category::Field, name, accessor, meta)
    }

    /// Appends one member-type record (`M`, named by its short type name)
    /// to `T`'s member-type table.
    ///
    /// # Panics
    ///
    /// Panics on a [`DeclareError`] or if the registry is sealed; see
    /// [`try_declare_member_type`](Self::try_declare_member_type).
    #[track_caller]
    pub fn declare_member_type<T: Any, M: Any>(&mut self, meta: Meta) {
        if let Err(error) = self.try_declare_member_type::<T, M>(meta) {
            panic!("{error}");
        }
    }

    /// Appends one member-type record to `T`'s member-type table, reporting
    /// structural errors.
    ///
    /// # Panics
    ///
    /// Panics if the registry is sealed.
    #[track_caller]
    pub fn try_declare_member_type<T: Any, M: Any>(
        &mut self,
        meta: Meta,
    ) -> Result<(), DeclareError> {
        self.assert_unsealed("declare_member_type");
        let member = Type::of::<M>();
        self.push_record::<T>(
            Category::MemberType,
            member.name(),
            Accessor::MemberType(member),
            meta,
        )
    }

    /// Declares the enum `E` from its own [`GetEnumInfo`] implementation.
    ///
    /// # Panics
    ///
    /// Panics on a [`DeclareError`] or if the registry is sealed; see
    /// [`try_declare_enum`](Self::try_declare_enum).
    #[track_caller]
    pub fn declare_enum<E: GetEnumInfo>(&mut self) {
        if let Err(error) = self.try_declare_enum::<E>() {
            panic!("{error}");
        }
    }

    /// Declares the enum `E`, reporting structural errors.
    ///
    /// # Panics
    ///
    /// Panics if the registry is sealed.
    #[track_caller]
    pub fn try_declare_enum<E: GetEnumInfo>(&mut self) -> Result<(), DeclareError> {
        self.try_declare_enum_info(E::get_enum_info())
    }

    /// Declares an enum from a manually built [`EnumInfo`].
    ///
    /// This is the escape hatch for foreign enums and for per-item meta that
    /// [`reflect_enum!`](crate::reflect_enum) does not cover.
    ///
    /// # Panics
    ///
    /// Panics if the registry is sealed.
    #[track_caller]
    pub fn try_declare_enum_info(&mut self, info: EnumInfo) -> Result<(), DeclareError> {
        self.assert_unsealed("declare_enum");

        let ty = *info.ty();
        if self.enums.contains(&ty.id()) {
            return Err(DeclareError::AlreadyDeclared {
                type_path: ty.path(),
            });
        }

        log::trace!("declared enum `{}` ({} items)", ty.path(), info.item_len());
        self.enums.insert(ty.id(), info);
        Ok(())
    }

    fn insert_class(&mut self, info: ClassInfo) -> Result<(), DeclareError> {
        let ty = *info.ty();
        if self.classes.contains(&ty.id()) {
            return Err(DeclareError::AlreadyDeclared {
                type_path: ty.path(),
            });
        }

        self.index_name(&info);
        log::trace!("declared class `{}`", ty.path());
        self.classes.insert(ty.id(), info);
        Ok(())
    }

    // Short display names may collide across modules; ambiguous names drop
    // out of the index rather than answering arbitrarily.
    fn index_name(&mut self, info: &ClassInfo) {
        let name = info.name();
        if self.ambiguous_names.contains(name) {
            return;
        }
        if self.name_to_id.contains_key(name) {
            self.name_to_id.remove(name);
            self.ambiguous_names.insert(name);
        } else {
            self.name_to_id.insert(name, info.ty().id());
        }
    }

    fn push_record<T: Any>(
        &mut self,
        category: Category,
        name: &'static str,
        accessor: Accessor,
        meta: Meta,
    ) -> Result<(), DeclareError> {
        let ty = Type::of::<T>();
        let Some(info) = self.classes.get_mut(&ty.id()) else {
            return Err(DeclareError::NotDeclared {
                type_path: ty.path(),
                category,
            });
        };

        let table = match category {
            Category::Field => info.fields_mut(),
            Category::MemberType => info.member_types_mut(),
            Category::Subclass | Category::EnumItem => {
                unreachable!("`push_record` only serves field and member-type tables")
            }
        };

        let index = table.len() + 1;
        table
            .push(FieldInfo::new(index, name, accessor, meta))
            .map_err(|_| DeclareError::CapacityOverflow {
                type_path: ty.path(),
                category,
                max: FactTable::<FieldInfo>::MAX_RECORDS,
            })?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Class queries

    /// Whether `T` has opted into reflection.
    #[track_caller]
    #[inline]
    pub fn is_reflected<T: Any>(&self) -> bool {
        self.is_reflected_by_id(TypeId::of::<T>())
    }

    /// Whether the type with the given [`TypeId`] has opted into reflection.
    #[track_caller]
    pub fn is_reflected_by_id(&self, type_id: TypeId) -> bool {
        self.assert_sealed("is_reflected");
        self.classes.contains(&type_id)
    }

    /// Returns the [`ClassInfo`] of `T`, or `None` if `T` is not reflected.
    #[track_caller]
    #[inline]
    pub fn class_info<T: Any>(&self) -> Option<&ClassInfo> {
        self.class_info_by_id(TypeId::of::<T>())
    }

    /// Returns the [`ClassInfo`] of the type with the given [`TypeId`].
    #[track_caller]
    pub fn class_info_by_id(&self, type_id: TypeId) -> Option<&ClassInfo> {
        self.assert_sealed("class_info");
        self.classes.get(&type_id)
    }

    /// Whether `T` is reflected and declared a base.
    #[track_caller]
    #[inline]
    pub fn has_base<T: Any>(&self) -> bool {
        self.has_base_by_id(TypeId::of::<T>())
    }

    /// Whether the type with the given [`TypeId`] is reflected and declared
    /// a base.
    #[track_caller]
    pub fn has_base_by_id(&self, type_id: TypeId) -> bool {
        self.assert_sealed("has_base");
        self.classes
            .get(&type_id)
            .is_some_and(ClassInfo::has_base)
    }

    /// Returns the [`ClassInfo`] with the given short display name.
    ///
    /// Returns `None` for unknown and for [ambiguous](Self::is_ambiguous)
    /// names.
    #[track_caller]
    pub fn get_with_name(&self, name: &str) -> Option<&ClassInfo> {
        self.assert_sealed("get_with_name");
        self.classes.get(self.name_to_id.get(name)?)
    }

    /// Returns `true` if the short display name matches more than one
    /// reflected class.
    #[track_caller]
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.assert_sealed("is_ambiguous");
        self.ambiguous_names.contains(name)
    }

    /// Returns an iterator over all reflected classes, in arbitrary order.
    #[track_caller]
    pub fn iter_classes(&self) -> impl ExactSizeIterator<Item = &ClassInfo> {
        self.assert_sealed("iter_classes");
        self.classes.values()
    }

    // -------------------------------------------------------------------------
    // Enum queries

    /// Returns the [`EnumInfo`] of `E`, or `None` if `E` was never declared.
    #[track_caller]
    #[inline]
    pub fn enum_info<E: EnumValue>(&self) -> Option<&EnumInfo> {
        self.enum_info_by_id(TypeId::of::<E>())
    }

    /// Returns the [`EnumInfo`] of the type with the given [`TypeId`].
    #[track_caller]
    pub fn enum_info_by_id(&self, type_id: TypeId) -> Option<&EnumInfo> {
        self.assert_sealed("enum_info");
        self.enums.get(&type_id)
    }

    /// Returns the declared name of `value`, or `""` if `value` names no
    /// declared enumerator (or `E` was never declared).
    #[track_caller]
    pub fn enum_to_string<E: EnumValue>(&self, value: E) -> &'static str {
        self.assert_sealed("enum_to_string");
        match self.enums.get(&TypeId::of::<E>()) {
            Some(info) => info.name_of(value.to_value()),
            None => "",
        }
    }

    /// Returns the enumerator named `name`, or `default` on a miss.
    ///
    /// The match is case-sensitive and exact.
    #[track_caller]
    pub fn string_to_enum<E: EnumValue>(&self, name: &str, default: E) -> E {
        self.assert_sealed("string_to_enum");
        self.enums
            .get(&TypeId::of::<E>())
            .and_then(|info| info.value_of(name))
            .and_then(E::from_value)
            .unwrap_or(default)
    }
}

// -----------------------------------------------------------------------------
// RegistryArc

#[cfg(feature = "std")]
mod registry_arc {
    use alloc::sync::Arc;
    use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

    use super::Registry;

    /// A shared handle to a [`Registry`].
    ///
    /// Fits the process-wide ownership model: one writer runs the declaration
    /// pass and seals, any number of readers query afterwards.
    #[derive(Clone, Default)]
    pub struct RegistryArc {
        /// The wrapped [`Registry`].
        pub internal: Arc<RwLock<Registry>>,
    }

    impl RegistryArc {
        /// Takes a read lock on the underlying [`Registry`].
        pub fn read(&self) -> RwLockReadGuard<'_, Registry> {
            self.internal.read().unwrap_or_else(PoisonError::into_inner)
        }

        /// Takes a write lock on the underlying [`Registry`].
        pub fn write(&self) -> RwLockWriteGuard<'_, Registry> {
            self.internal
                .write()
                .unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl core::fmt::Debug for RegistryArc {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            let registry = self.read();
            f.debug_struct("RegistryArc")
                .field("sealed", &registry.is_sealed())
                .field("classes", &registry.classes.len())
                .finish()
        }
    }
}

#[cfg(feature = "std")]
pub use registry_arc::RegistryArc;

#[cfg(test)]
mod tests {
    use super::*;

    struct Shape {
        #[expect(dead_code)]
        name: u32,
    }
    struct Circle;
    struct Square;

    fn shapes() -> Registry {
        let mut registry = Registry::new();
        registry.declare_root::<Shape>();
        registry.declare_subtype::<Circle, Shape>();
        registry.declare_subtype::<Square, Shape>();
        registry
    }

    #[test]
    fn roots_and_subtypes() {
        let mut registry = shapes();
        registry.seal();

        assert!(registry.is_reflected::<Shape>());
        assert!(registry.is_reflected::<Circle>());
        assert!(!registry.is_reflected::<u32>());

        assert!(!registry.has_base::<Shape>());
        assert!(registry.has_base::<Circle>());
        assert!(!registry.has_base::<u64>());

        let info = registry.class_info::<Circle>().unwrap();
        assert!(info.base().unwrap().is::<Shape>());
        assert_eq!(info.size(), size_of::<Circle>());

        // Subclass registration was a side effect of the subtype declarations.
        let shape = registry.class_info::<Shape>().unwrap();
        assert_eq!(shape.subclasses().len(), 2);
    }

    #[test]
    fn declaration_errors() {
        let mut registry = shapes();

        assert_eq!(
            registry.try_declare_root::<Shape>(),
            Err(DeclareError::AlreadyDeclared {
                type_path: core::any::type_name::<Shape>(),
            })
        );
        assert_eq!(
            registry.try_declare_subtype::<Square, Square>(),
            Err(DeclareError::SelfBase {
                type_path: core::any::type_name::<Square>(),
            })
        );

        struct Unknown;
        struct Orphan;
        assert_eq!(
            registry.try_declare_subtype::<Orphan, Unknown>(),
            Err(DeclareError::UnknownBase {
                type_path: core::any::type_name::<Orphan>(),
                base_path: core::any::type_name::<Unknown>(),
            })
        );

        assert_eq!(
            registry.try_declare_field::<Orphan>(
                "x",
                Accessor::member_type::<u32>(),
                Meta::none()
            ),
            Err(DeclareError::NotDeclared {
                type_path: core::any::type_name::<Orphan>(),
                category: Category::Field,
            })
        );
    }

    #[test]
    fn field_capacity_overflow() {
        let mut registry = Registry::new();
        registry.declare_root::<Shape>();

        for _ in 0..FactTable::<FieldInfo>::MAX_RECORDS {
            registry
                .try_declare_field::<Shape>("f", Accessor::member_type::<u32>(), Meta::none())
                .unwrap();
        }
        assert_eq!(
            registry.try_declare_field::<Shape>("f", Accessor::member_type::<u32>(), Meta::none()),
            Err(DeclareError::CapacityOverflow {
                type_path: core::any::type_name::<Shape>(),
                category: Category::Field,
                max: 255,
            })
        );
    }

    #[test]
    fn subclass_capacity_overflow_leaves_no_trace() {
        let mut registry = Registry::new();
        registry.declare_root::<Shape>();

        // Fill the base's subclass table to the ceiling.
        let shape_id = TypeId::of::<Shape>();
        for _ in 0..FactTable::<Type>::MAX_RECORDS {
            registry
                .classes
                .get_mut(&shape_id)
                .unwrap()
                .subclasses_mut()
                .push(Type::of::<u8>())
                .ok()
                .unwrap();
        }

        assert_eq!(
            registry.try_declare_subtype::<Circle, Shape>(),
            Err(DeclareError::CapacityOverflow {
                type_path: core::any::type_name::<Shape>(),
                category: Category::Subclass,
                max: 255,
            })
        );

        // The failed declaration left nothing behind.
        registry.seal();
        assert!(!registry.is_reflected::<Circle>());
        assert_eq!(
            registry.class_info::<Shape>().unwrap().subclasses().len(),
            FactTable::<Type>::MAX_RECORDS
        );
    }

    #[test]
    fn class_meta_round_trip() {
        struct Widget;
        struct Gadget;

        let mut registry = Registry::new();
        registry.declare_root_with_meta::<Widget>(Meta::new("editor-visible"));
        registry.declare_subtype_with_meta::<Gadget, Widget>(Meta::new(7u32));
        registry.seal();

        let widget = registry.class_info::<Widget>().unwrap();
        assert_eq!(widget.meta().get::<&str>(), Some(&"editor-visible"));

        let gadget = registry.class_info::<Gadget>().unwrap();
        assert_eq!(gadget.meta().get::<u32>(), Some(&7));

        // The plain declarations default to no meta.
        let mut registry = Registry::new();
        registry.declare_root::<Shape>();
        registry.seal();
        assert!(registry.class_info::<Shape>().unwrap().meta().is_none());
    }

    #[test]
    #[should_panic(expected = "before the registry was sealed")]
    fn query_before_seal_panics() {
        let registry = shapes();
        let _ = registry.is_reflected::<Shape>();
    }

    #[test]
    #[should_panic(expected = "after the registry was sealed")]
    fn declare_after_seal_panics() {
        let mut registry = shapes();
        registry.seal();
        registry.declare_root::<u32>();
    }

    #[test]
    fn name_lookup_and_ambiguity() {
        mod first {
            pub struct Dup;
        }
        mod second {
            pub struct Dup;
        }

        let mut registry = shapes();
        registry.declare_root::<first::Dup>();
        registry.declare_root::<second::Dup>();
        registry.seal();

        assert!(registry.get_with_name("Shape").unwrap().ty().is::<Shape>());
        assert!(registry.get_with_name("Ellipse").is_none());

        assert!(registry.is_ambiguous("Dup"));
        assert!(registry.get_with_name("Dup").is_none());
    }

    #[test]
    fn seal_is_idempotent() {
        let mut registry = shapes();
        registry.seal();
        registry.seal();
        assert!(registry.is_sealed());
        assert_eq!(registry.iter_classes().len(), 3);
    }
}
