//! # redblack
//!
//! An ordered map backed by a red-black tree, with detached bidirectional
//! cursors that survive any mutation not touching the element they refer to.
//!
//! ## Overview
//!
//! - **[`TreeMap`](map::TreeMap)**: sorted key/value container with
//!   logarithmic `find`, `insert` and `erase`
//! - **[`Cursor`](cursor::Cursor) / [`ConstCursor`](cursor::ConstCursor)**:
//!   positions that step forward and backward in key order and are checked
//!   against the map on every use
//! - **[`Compare`](compare::Compare)**: pluggable strict weak orders
//! - **[`error`]**: explicit error values for absent keys and cursor misuse
//!
//! ## Example
//!
//! ```rust
//! use redblack::prelude::*;
//!
//! let mut map = TreeMap::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     map.insert(key, key.to_string());
//! }
//!
//! let mut cursor = map.begin();
//! cursor.move_next(&map).unwrap();
//! assert_eq!(cursor.key(&map), Ok(&3));
//!
//! map.erase(cursor).unwrap();
//! assert_eq!(cursor.get(&map), Err(InvalidIteratorError::Stale));
//! assert_eq!(map.at(&100), Err(OutOfBoundsError));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use redblack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compare::{Compare, NaturalOrder, ReverseOrder};
    pub use crate::cursor::{ConstCursor, Cursor};
    pub use crate::error::{InvalidIteratorError, MapError, OutOfBoundsError};
    pub use crate::map::TreeMap;
}

pub mod compare;
pub mod cursor;
pub mod error;
pub mod map;

mod tree;
