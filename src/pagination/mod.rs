//! Cursor-based pagination over the unordered file set.
//!
//! Files are ordered by `(created_at in milliseconds, id)`, both ascending, with
//! ids compared ordinally. The cursor names a position in that order and a page
//! holds the files strictly after it.

mod cursor;
mod page;

pub use cursor::{Cursor, CursorError};
pub use page::{paginate, Page, PAGE_SIZE};
