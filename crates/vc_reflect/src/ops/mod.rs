//! Read-only access traits for container types.
//!
//! A container describes itself by implementing one of these traits; the
//! matching info constructor ([`ListInfo::new`], [`MapInfo::new`],
//! [`PointerInfo::new`], [`StringInfo::new`]) turns the trait methods into
//! type-erased accessors.
//!
//! [`ListInfo::new`]: crate::info::ListInfo::new
//! [`MapInfo::new`]: crate::info::MapInfo::new
//! [`PointerInfo::new`]: crate::info::PointerInfo::new
//! [`StringInfo::new`]: crate::info::StringInfo::new

use crate::info::Typed;

// -----------------------------------------------------------------------------
// List

/// A contiguous list of inline items.
///
/// # Examples
///
/// ```
/// use vc_reflect::ops::List;
///
/// let v = vec![1, 2, 3];
/// assert_eq!(List::as_items(&v), Some(&[1, 2, 3][..]));
///
/// let none: Option<Vec<i32>> = None;
/// assert_eq!(none.as_items(), None);
/// ```
pub trait List: 'static {
    type Item: Typed;

    /// Returns the items, or `None` for a null list.
    fn as_items(&self) -> Option<&[Self::Item]>;
}

// -----------------------------------------------------------------------------
// Map

/// A key-value map.
pub trait Map: 'static {
    type Key: Typed;
    type Value: Typed;

    /// Returns the number of entries.
    fn entry_count(&self) -> usize;

    /// Calls `f` once for every entry, in the map's iteration order.
    fn for_each_entry<'a>(&'a self, f: &mut dyn FnMut(&'a Self::Key, &'a Self::Value));
}

// -----------------------------------------------------------------------------
// Pointer

/// An owning pointer, possibly nullable.
pub trait Pointer: 'static {
    type Target: Typed;

    /// Returns the pointee, or `None` for a null pointer.
    fn target(&self) -> Option<&Self::Target>;
}

// -----------------------------------------------------------------------------
// Text

/// A UTF-8 string.
pub trait Text: 'static {
    /// Borrows the string content.
    fn as_text(&self) -> &str;
}
