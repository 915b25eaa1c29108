//! Storage layer for readlog.
//!
//! - **Database**: the one SQLite connection, opened at startup
//! - **BookGateway**: parameterised statements against the `books` table
//!
//! # Example
//!
//! ```ignore
//! use readlog::store::{BookGateway, Database};
//! use readlog::domain::NewBook;
//!
//! let db = Database::open(Path::new("readlog.db"))?;
//! let gateway = BookGateway::new(&db);
//! let id = gateway.insert("sophie", &NewBook::new("Dune").into_fields())?;
//! let fields = gateway.fetch_by_id(id)?;
//! ```

mod database;
mod gateway;

pub use database::Database;
pub use gateway::BookGateway;
