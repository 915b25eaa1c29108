//! Reading-log operations.
//!
//! One method per use case. Each shapes its input, calls the gateway, and
//! turns "no such row" into `ReadlogError::NotFound` so callers can report it.

use chrono::NaiveDate;
use log::{info, warn};

use crate::domain::{Book, BookFields, BookStatus, FieldUpdate, NewBook};
use crate::error::{ReadlogError, Result};
use crate::store::{BookGateway, Database};
use crate::table::Table;

/// Complete books in a date range and how many there are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub books: Table,
    pub count: i64,
}

/// Pending books and how many there are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReport {
    pub books: Table,
    pub count: i64,
}

pub struct Library<'db> {
    gateway: BookGateway<'db>,
}

impl<'db> Library<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self {
            gateway: BookGateway::new(db),
        }
    }

    /// Add a book for `username`, filling in defaults. Returns the new id.
    pub fn add_book(&self, username: &str, book: NewBook) -> Result<i64> {
        if book.title.trim().is_empty() {
            return Err(ReadlogError::validation("title is required"));
        }
        if let Some(pct) = book.pct_read.filter(|pct| *pct < 0) {
            return Err(ReadlogError::validation(format!("percentage read cannot be {pct}")));
        }

        let fields = book.into_fields();
        let id = self.gateway.insert(username, &fields)?;
        info!("Inserted book {} '{}'", id, fields.title);
        Ok(id)
    }

    /// Editable fields of one book.
    pub fn book(&self, id: i64) -> Result<BookFields> {
        self.gateway.fetch_by_id(id)?.ok_or(ReadlogError::NotFound(id))
    }

    pub fn update_book(&self, id: i64, update: &FieldUpdate) -> Result<i64> {
        match self.gateway.update_field(id, update)? {
            Some(id) => {
                info!("Updated book {} field {}", id, update.field());
                Ok(id)
            }
            None => {
                warn!("Update of missing book {}", id);
                Err(ReadlogError::NotFound(id))
            }
        }
    }

    pub fn remove_book(&self, id: i64) -> Result<i64> {
        match self.gateway.delete_by_id(id)? {
            Some(id) => {
                info!("Deleted book {}", id);
                Ok(id)
            }
            None => {
                warn!("Delete of missing book {}", id);
                Err(ReadlogError::NotFound(id))
            }
        }
    }

    /// Delete every book and restart ids at 1.
    pub fn clear(&self) -> Result<()> {
        self.gateway.truncate()?;
        info!("Truncated books table");
        Ok(())
    }

    /// The whole table for display.
    pub fn table(&self) -> Result<Table> {
        self.gateway.view_all()
    }

    pub fn books(&self) -> Result<Vec<Book>> {
        self.gateway.list_books()
    }

    /// Books completed with `start_read_date >= start` and `end_read_date <= end`.
    pub fn completed_between(&self, start: NaiveDate, end: NaiveDate) -> Result<CompletedReport> {
        let books = self.gateway.list_completed_in_range(start, end)?;
        let count = self.gateway.count_completed_in_range(start, end)?;
        info!("{} books completed between {} and {}", count, start, end);
        Ok(CompletedReport {
            start,
            end,
            books,
            count,
        })
    }

    pub fn pending(&self) -> Result<PendingReport> {
        let books = self.gateway.list_by_status(BookStatus::Pending)?;
        let count = self.gateway.count_pending()?;
        info!("{} pending books", count);
        Ok(PendingReport { books, count })
    }

    /// Books whose title contains `keyword`, ignoring case.
    pub fn search(&self, keyword: &str) -> Result<Table> {
        let found = self.gateway.search_by_title(keyword)?;
        info!("Title search {:?} matched {} books", keyword, found.len());
        Ok(found)
    }
}
