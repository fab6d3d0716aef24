//! String interner for identifiers and labels.
//!
//! Interned text is leaked to obtain `&'static str` lookups. Programs intern
//! a bounded vocabulary (identifiers, labels, property names), so the leak is
//! proportional to source size, not to evaluation time.

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

struct InternTable {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create an interner with the well-known names at their fixed indices.
    pub fn new() -> Self {
        let mut table = InternTable {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        for (index, text) in (0u32..).zip(Name::PREDEFINED) {
            table.map.insert(text, Name::from_index(index));
            table.strings.push(text);
        }
        StringInterner {
            table: RwLock::new(table),
        }
    }

    /// Intern `s`, returning its stable `Name`.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&name) = self.table.read().map.get(s) {
            return name;
        }

        let mut table = self.table.write();
        // Another writer may have won the race between the two locks.
        if let Some(&name) = table.map.get(s) {
            return name;
        }
        let index = u32::try_from(table.strings.len()).unwrap_or(u32::MAX);
        let name = Name::from_index(index);
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.map.insert(leaked, name);
        table.strings.push(leaked);
        name
    }

    /// Text of an interned name. Unknown names map to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings, including the predefined ones.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheaply clonable handle to a shared interner.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &StringInterner {
        &self.0
    }
}

impl std::fmt::Debug for SharedInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SharedInterner({} names)", self.len())
    }
}
