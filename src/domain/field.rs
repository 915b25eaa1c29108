//! The closed set of fields a reader may update.
//!
//! Column names never come from user text. A `BookField` is chosen from a
//! menu or parsed against the allow-list, and each variant owns one fixed
//! UPDATE statement; only the new value is bound as a parameter.

use chrono::NaiveDate;
use rusqlite::types::{ToSql, ToSqlOutput};
use std::str::FromStr;

use super::book::{BookStatus, parse_optional_date, parse_pct_read};
use crate::error::{ReadlogError, Result};

/// An updatable column of the `books` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Title,
    Description,
    Status,
    PctRead,
    StartReadDate,
    EndReadDate,
}

impl BookField {
    /// All updatable fields, in update-menu order.
    pub const ALL: [BookField; 6] = [
        BookField::Title,
        BookField::Description,
        BookField::Status,
        BookField::PctRead,
        BookField::StartReadDate,
        BookField::EndReadDate,
    ];

    /// Column name in the store.
    pub fn column(&self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Description => "description",
            BookField::Status => "status",
            BookField::PctRead => "pct_read",
            BookField::StartReadDate => "start_read_date",
            BookField::EndReadDate => "end_read_date",
        }
    }

    /// Human label used in the update menu.
    pub fn label(&self) -> &'static str {
        match self {
            BookField::Title => "book title",
            BookField::Description => "book description",
            BookField::Status => "read status",
            BookField::PctRead => "percentage read",
            BookField::StartReadDate => "start date",
            BookField::EndReadDate => "end date",
        }
    }

    /// Prompt shown when asking for the new value.
    pub fn value_prompt(&self) -> &'static str {
        match self {
            BookField::Title => "Enter the new title: ",
            BookField::Description => "Enter the new description (blank to clear): ",
            BookField::Status => "Enter the new status (pending, reading, complete): ",
            BookField::PctRead => "Enter the new percentage: ",
            BookField::StartReadDate => "Enter the new start date(YYYY-MM-DD, blank to clear): ",
            BookField::EndReadDate => "Enter the new end date(YYYY-MM-DD, blank to clear): ",
        }
    }

    /// The single parameterised statement that updates this column.
    ///
    /// `?1` is the new value, `?2` the book id.
    pub fn update_sql(&self) -> &'static str {
        match self {
            BookField::Title => "UPDATE books SET title = ?1 WHERE id = ?2",
            BookField::Description => "UPDATE books SET description = ?1 WHERE id = ?2",
            BookField::Status => "UPDATE books SET status = ?1 WHERE id = ?2",
            BookField::PctRead => "UPDATE books SET pct_read = ?1 WHERE id = ?2",
            BookField::StartReadDate => "UPDATE books SET start_read_date = ?1 WHERE id = ?2",
            BookField::EndReadDate => "UPDATE books SET end_read_date = ?1 WHERE id = ?2",
        }
    }

    /// Map an update-menu number (1-6) to a field.
    pub fn from_menu_choice(choice: u32) -> Option<Self> {
        let index = usize::try_from(choice).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for BookField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl FromStr for BookField {
    type Err = ReadlogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.column() == s.trim())
            .ok_or_else(|| ReadlogError::validation(format!("'{}' is not an updatable field", s.trim())))
    }
}

/// A typed value for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    OptionalText(Option<String>),
    Status(BookStatus),
    Integer(i64),
    Date(Option<NaiveDate>),
}

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            FieldValue::Text(text) => text.to_sql(),
            FieldValue::OptionalText(text) => text.to_sql(),
            FieldValue::Status(status) => status.to_sql(),
            FieldValue::Integer(n) => n.to_sql(),
            FieldValue::Date(date) => date.to_sql(),
        }
    }
}

/// A validated single-field change.
///
/// Only constructible through `parse`, so the value always has the type its
/// column expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    field: BookField,
    value: FieldValue,
}

impl FieldUpdate {
    /// Validate raw user text as the new value of `field`.
    pub fn parse(field: BookField, raw: &str) -> Result<Self> {
        let value = match field {
            BookField::Title => {
                let title = raw.trim();
                if title.is_empty() {
                    return Err(ReadlogError::validation("title cannot be empty"));
                }
                FieldValue::Text(title.to_string())
            }
            BookField::Description => {
                let text = raw.trim();
                FieldValue::OptionalText((!text.is_empty()).then(|| text.to_string()))
            }
            BookField::Status => FieldValue::Status(raw.parse()?),
            BookField::PctRead => FieldValue::Integer(parse_pct_read(raw)?),
            BookField::StartReadDate | BookField::EndReadDate => FieldValue::Date(parse_optional_date(raw)?),
        };
        Ok(Self { field, value })
    }

    /// Parse both the field name and its value, e.g. from a script.
    pub fn parse_named(column: &str, raw: &str) -> Result<Self> {
        Self::parse(column.parse()?, raw)
    }

    pub fn field(&self) -> BookField {
        self.field
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }
}
