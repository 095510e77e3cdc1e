//! A bitset indexed by enumerator values.

use core::fmt;
use core::marker::PhantomData;

use crate::info::EnumValue;

// -----------------------------------------------------------------------------
// Flags

/// A bitset over the enumerators of `E`.
///
/// Each enumerator's declared value is used as a bit position, so the set
/// only fits enums whose values lie in `0..64`. An out-of-range position is a
/// programming error and panics.
///
/// # Examples
///
/// ```
/// use tyref::{Flags, reflect_enum};
///
/// reflect_enum! {
///     pub enum Permission {
///         Read = 0,
///         Write = 1,
///         Execute = 2,
///     }
/// }
///
/// let mut flags = Flags::new();
/// flags.set_flag(Permission::Read);
/// flags.set_flag(Permission::Execute);
///
/// assert!(flags.has_flag(Permission::Read));
/// assert!(!flags.has_flag(Permission::Write));
///
/// flags.clear_flag(Permission::Read);
/// assert!(!flags.has_flag(Permission::Read));
/// assert_eq!(flags.bits(), 0b100);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Flags<E: EnumValue> {
    bits: u64,
    _enum: PhantomData<E>,
}

impl<E: EnumValue> Flags<E> {
    /// Creates an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self {
            bits: 0,
            _enum: PhantomData,
        }
    }

    /// Returns `true` if `flag` is set.
    #[inline]
    pub fn has_flag(&self, flag: E) -> bool {
        self.bits & Self::bit(flag) != 0
    }

    /// Sets `flag`.
    #[inline]
    pub fn set_flag(&mut self, flag: E) {
        self.bits |= Self::bit(flag);
    }

    /// Clears `flag`.
    #[inline]
    pub fn clear_flag(&mut self, flag: E) {
        self.bits &= !Self::bit(flag);
    }

    /// Clears every flag.
    #[inline]
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Returns the raw bit pattern.
    #[inline]
    pub const fn bits(&self) -> u64 {
        self.bits
    }

    #[track_caller]
    fn bit(flag: E) -> u64 {
        let position = flag.to_value();
        assert!(
            (0..64).contains(&position),
            "enumerator value {position} is out of the flag range 0..64"
        );
        1 << position
    }
}

impl<E: EnumValue> Default for Flags<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnumValue> fmt::Debug for Flags<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flags({:#b})", self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Permission {
        Read = 0,
        Write = 1,
        Top = 63,
    }

    impl EnumValue for Permission {
        fn to_value(self) -> i64 {
            self as i64
        }

        fn from_value(value: i64) -> Option<Self> {
            match value {
                0 => Some(Self::Read),
                1 => Some(Self::Write),
                63 => Some(Self::Top),
                _ => None,
            }
        }
    }

    #[test]
    fn set_query_clear() {
        let mut flags = Flags::new();
        assert_eq!(flags.bits(), 0);

        flags.set_flag(Permission::Read);
        flags.set_flag(Permission::Top);
        assert!(flags.has_flag(Permission::Read));
        assert!(!flags.has_flag(Permission::Write));
        assert!(flags.has_flag(Permission::Top));
        assert_eq!(flags.bits(), 1 | 1 << 63);

        // Setting twice is idempotent.
        flags.set_flag(Permission::Read);
        assert_eq!(flags.bits(), 1 | 1 << 63);

        flags.clear_flag(Permission::Read);
        assert!(!flags.has_flag(Permission::Read));

        flags.clear();
        assert_eq!(flags, Flags::new());
    }

    #[test]
    #[should_panic(expected = "out of the flag range")]
    fn out_of_range_position_panics() {
        #[derive(Clone, Copy)]
        enum Wide {
            Huge = 64,
        }
        impl EnumValue for Wide {
            fn to_value(self) -> i64 {
                self as i64
            }
            fn from_value(value: i64) -> Option<Self> {
                (value == 64).then_some(Self::Huge)
            }
        }

        let mut flags = Flags::new();
        flags.set_flag(Wide::Huge);
    }
}
