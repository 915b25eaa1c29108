//! Domain types for readlog
//!
//! - Book: a stored row, split into identity and editable fields
//! - NewBook: the creation payload with its defaults
//! - BookField / FieldUpdate: the allow-list of updatable columns

pub mod book;
pub mod field;

pub use book::{Book, BookFields, BookStatus, NewBook, parse_date, parse_optional_date, parse_pct_read};
pub use field::{BookField, FieldUpdate, FieldValue};
