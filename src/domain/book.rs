//! Book record types.
//!
//! A book row in the store is split in two: the identity columns (`id`,
//! `username`) that never change after insert, and `BookFields`, the six
//! columns a reader may edit one at a time.

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::str::FromStr;

use crate::error::ReadlogError;

/// Reading status of a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookStatus {
    /// On the shelf, not started
    #[default]
    Pending,
    /// Currently being read
    Reading,
    /// Finished
    Complete,
}

impl BookStatus {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Pending => "pending",
            BookStatus::Reading => "reading",
            BookStatus::Complete => "complete",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = ReadlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookStatus::Pending),
            "reading" => Ok(BookStatus::Reading),
            "complete" => Ok(BookStatus::Complete),
            other => Err(ReadlogError::validation(format!(
                "unknown status '{other}' (expected pending, reading or complete)"
            ))),
        }
    }
}

impl ToSql for BookStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for BookStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse().map_err(|e: ReadlogError| FromSqlError::Other(Box::new(e)))
    }
}

/// The editable columns of a book, in table order.
///
/// This is what a lookup by id returns: everything except `id` and `username`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub description: Option<String>,
    pub status: BookStatus,
    pub pct_read: i64,
    pub start_read_date: Option<NaiveDate>,
    pub end_read_date: Option<NaiveDate>,
}

/// A complete row of the `books` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Store-assigned identifier
    pub id: i64,
    /// Owner, fixed at creation
    pub username: String,
    pub fields: BookFields,
}

/// Creation payload for a new book.
///
/// Only the title is required; `into_fields` fills in the defaults for
/// everything the caller left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<BookStatus>,
    pub pct_read: Option<i64>,
    pub start_read_date: Option<NaiveDate>,
    pub end_read_date: Option<NaiveDate>,
}

impl NewBook {
    /// Start a payload with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: BookStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_pct_read(mut self, pct_read: i64) -> Self {
        self.pct_read = Some(pct_read);
        self
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_read_date = start;
        self.end_read_date = end;
        self
    }

    /// Resolve defaults: status `pending`, `pct_read` 0, other fields absent.
    pub fn into_fields(self) -> BookFields {
        BookFields {
            title: self.title,
            description: self.description,
            status: self.status.unwrap_or_default(),
            pct_read: self.pct_read.unwrap_or(0),
            start_read_date: self.start_read_date,
            end_read_date: self.end_read_date,
        }
    }
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> crate::Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ReadlogError::validation(format!("'{raw}' is not a date in YYYY-MM-DD form")))
}

/// Parse an optional date; blank input means absent.
pub fn parse_optional_date(raw: &str) -> crate::Result<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(raw).map(Some)
    }
}

/// Parse a read percentage. Negative values are rejected; there is no upper bound.
pub fn parse_pct_read(raw: &str) -> crate::Result<i64> {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(pct) if pct >= 0 => Ok(pct),
        Ok(_) => Err(ReadlogError::validation("percentage read cannot be negative")),
        Err(_) => Err(ReadlogError::validation(format!("'{raw}' is not a whole number"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_status_as_str() {
        assert_eq!(BookStatus::Pending.as_str(), "pending");
        assert_eq!(BookStatus::Reading.as_str(), "reading");
        assert_eq!(BookStatus::Complete.as_str(), "complete");
    }

    #[test]
    fn test_book_status_parse_is_lenient_on_case() {
        assert_eq!("Complete".parse::<BookStatus>().unwrap(), BookStatus::Complete);
        assert_eq!(" reading ".parse::<BookStatus>().unwrap(), BookStatus::Reading);
    }

    #[test]
    fn test_book_status_parse_rejects_unknown() {
        let err = "abandoned".parse::<BookStatus>().unwrap_err();
        assert!(matches!(err, ReadlogError::Validation(_)));
    }

    #[test]
    fn test_new_book_defaults() {
        let fields = NewBook::new("Dune").into_fields();
        assert_eq!(fields.title, "Dune");
        assert_eq!(fields.status, BookStatus::Pending);
        assert_eq!(fields.pct_read, 0);
        assert!(fields.description.is_none());
        assert!(fields.start_read_date.is_none());
        assert!(fields.end_read_date.is_none());
    }

    #[test]
    fn test_new_book_keeps_supplied_values() {
        let start = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
        let fields = NewBook::new("Emma")
            .with_description("Austen")
            .with_status(BookStatus::Reading)
            .with_pct_read(40)
            .with_dates(Some(start), None)
            .into_fields();
        assert_eq!(fields.description.as_deref(), Some("Austen"));
        assert_eq!(fields.status, BookStatus::Reading);
        assert_eq!(fields.pct_read, 40);
        assert_eq!(fields.start_read_date, Some(start));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2023-12-31").unwrap(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert!(parse_date("31/12/2023").is_err());
        assert!(parse_date("2023-02-30").is_err());
    }

    #[test]
    fn test_parse_optional_date_blank_is_absent() {
        assert_eq!(parse_optional_date("").unwrap(), None);
        assert_eq!(parse_optional_date("   ").unwrap(), None);
        assert!(parse_optional_date("soon").is_err());
    }

    #[test]
    fn test_parse_pct_read() {
        assert_eq!(parse_pct_read("55").unwrap(), 55);
        assert_eq!(parse_pct_read("250").unwrap(), 250);
        assert!(parse_pct_read("-1").is_err());
        assert!(parse_pct_read("half").is_err());
    }
}
