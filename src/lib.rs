//! readlog - a terminal reading log
//!
//! Tracks books in a SQLite table and lets a single reader query, add,
//! update and remove them through nested numbered menus.

pub mod domain;
pub mod error;
pub mod library;
pub mod session;
pub mod store;
pub mod table;

pub use error::{ReadlogError, Result};
