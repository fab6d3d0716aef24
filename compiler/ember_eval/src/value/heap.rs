//! Shared, mutable storage for reference values.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use super::{ObjectMap, Value};

/// Contents of a heap cell that can hold further values.
pub trait HeapContents {
    /// Move every directly held value into `out`, leaving `self` empty.
    fn drain_values(&mut self, out: &mut Vec<Value>);
}

impl HeapContents for ObjectMap {
    fn drain_values(&mut self, out: &mut Vec<Value>) {
        out.extend(self.drain(..).map(|(_, value)| value));
    }
}

impl HeapContents for Vec<Value> {
    fn drain_values(&mut self, out: &mut Vec<Value>) {
        out.append(self);
    }
}

/// Reference-counted cell holding an object's or array's contents.
///
/// Construction is restricted to the `value` module so every reference
/// value is created through a `Value` factory (`Value::object`,
/// `Value::array`). Clones share the same storage; equality between two
/// handles is identity (`ptr_eq`), never structural.
///
/// Releasing the last handle tears the contents down iteratively, so a
/// long chain (`{ next: { next: ... } }`, `[[[...]]]`) is freed without
/// one native frame per link.
#[repr(transparent)]
pub struct Heap<T: HeapContents>(Rc<RefCell<T>>);

impl<T: HeapContents> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// The contents, unless they are mutably borrowed right now.
    #[inline]
    pub(crate) fn try_borrow(&self) -> Option<Ref<'_, T>> {
        self.0.try_borrow().ok()
    }

    /// `true` when both handles point at the same storage.
    #[inline]
    pub fn ptr_eq(&self, other: &Heap<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared storage, used for cycle detection.
    #[inline]
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    /// Number of handles sharing this storage.
    #[inline]
    pub(crate) fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Empty the contents whoever else holds them. A cell that is borrowed
    /// right now is left alone.
    pub(crate) fn clear(&self) {
        let mut released = Vec::new();
        if let Ok(mut contents) = self.0.try_borrow_mut() {
            contents.drain_values(&mut released);
        }
        drop(released);
    }

    /// Empty the contents if this is the last handle.
    #[inline]
    fn drain_if_unique(&mut self, out: &mut Vec<Value>) {
        if let Some(cell) = Rc::get_mut(&mut self.0) {
            cell.get_mut().drain_values(out);
        }
    }
}

impl<T: HeapContents> Drop for Heap<T> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.drain_if_unique(&mut pending);
        // Children are emptied before they are dropped, so each drop below
        // finds nothing left to release.
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Value::Object(map) => map.drain_if_unique(&mut pending),
                Value::Array(items) => items.drain_if_unique(&mut pending),
                _ => {}
            }
        }
    }
}

impl<T: HeapContents> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: HeapContents> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Heap({:#x})", self.addr())
    }
}
