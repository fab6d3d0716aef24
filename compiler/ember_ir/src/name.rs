//! Interned identifier handle.

use std::fmt;

/// Interned string identifier.
///
/// A `Name` is an index into a [`StringInterner`](crate::StringInterner).
/// Equality is index equality, so two names from the same interner compare
/// equal exactly when their text is equal.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);
    pub const UNDEFINED: Name = Name(1);
    pub const NAN: Name = Name(2);
    pub const INFINITY: Name = Name(3);
    pub const MODULE: Name = Name(4);
    pub const EXPORTS: Name = Name(5);
    pub const LENGTH: Name = Name(6);
    pub const NAME: Name = Name(7);
    pub const MESSAGE: Name = Name(8);
    pub const CONSOLE: Name = Name(9);
    pub const LOG: Name = Name(10);
    pub const OF: Name = Name(11);

    /// Text of every pre-interned name, in index order.
    pub(crate) const PREDEFINED: [&'static str; 12] = [
        "",
        "undefined",
        "NaN",
        "Infinity",
        "module",
        "exports",
        "length",
        "name",
        "message",
        "console",
        "log",
        "of",
    ];

    #[inline]
    pub(crate) const fn from_index(index: u32) -> Self {
        Name(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

crate::static_assert_size!(Name, 4);
