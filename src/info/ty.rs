use core::any::{Any, TypeId};

// -----------------------------------------------------------------------------
// Type

/// A [`TypeId`] paired with the type's path.
///
/// The path comes from [`core::any::type_name`]; the short display
/// [`name`](Type::name) is the last path segment, which is also what the
/// registry indexes for [name lookup](crate::Registry::get_with_name).
///
/// # Examples
///
/// ```
/// use tyref::Type;
///
/// let ty = Type::of::<String>();
/// assert_eq!(ty.path(), "alloc::string::String");
/// assert_eq!(ty.name(), "String");
/// assert!(ty.is::<String>());
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path, e.g. `my_crate::shapes::Circle`.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the short display name, e.g. `Circle`.
    ///
    /// For a generic type the generic arguments keep their own paths,
    /// only the outermost segment is shortened.
    #[inline]
    pub fn name(&self) -> &'static str {
        short_name(self.path)
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl core::fmt::Debug for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Type").field(&self.path).finish()
    }
}

/// Strips the module path from a type path, keeping generic arguments.
fn short_name(path: &'static str) -> &'static str {
    let end = path.find('<').unwrap_or(path.len());
    match path[..end].rfind("::") {
        Some(sep) => &path[sep + 2..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names() {
        assert_eq!(short_name("my_crate::shapes::Circle"), "Circle");
        assert_eq!(short_name("Circle"), "Circle");
        assert_eq!(
            short_name("core::option::Option<alloc::string::String>"),
            "Option<alloc::string::String>"
        );
    }

    #[test]
    fn type_identity() {
        let ty = Type::of::<u32>();
        assert!(ty.is::<u32>());
        assert!(!ty.is::<i32>());
        assert_eq!(ty, Type::of::<u32>());
    }
}
