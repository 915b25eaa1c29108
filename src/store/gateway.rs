//! Statement-level access to the `books` table.
//!
//! Every method issues one parameterised statement (truncate issues two
//! inside a transaction) and returns the raw outcome: a scalar, an optional
//! row, or a `Table` of rows with their column names. Missing ids come back
//! as `None`, never as an error.

use chrono::NaiveDate;
use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, Params, Row, params};

use crate::domain::{Book, BookFields, BookStatus, FieldUpdate};
use crate::error::Result;
use crate::store::Database;
use crate::table::Table;

const BOOK_COLUMNS: &str =
    "id, username, title, description, status, pct_read, start_read_date, end_read_date";

/// Gateway over the `books` table of one open database.
pub struct BookGateway<'db> {
    conn: &'db Connection,
}

impl<'db> BookGateway<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { conn: db.connection() }
    }

    /// Insert a book and return the id the store assigned to it.
    pub fn insert(&self, username: &str, book: &BookFields) -> Result<i64> {
        debug!("INSERT book '{}' for {}", book.title, username);
        self.conn.execute(
            r#"
            INSERT INTO books
            (username, title, description, status, pct_read, start_read_date, end_read_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                username,
                book.title,
                book.description,
                book.status,
                book.pct_read,
                book.start_read_date,
                book.end_read_date,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Editable fields of one book, or `None` if no row has this id.
    pub fn fetch_by_id(&self, id: i64) -> Result<Option<BookFields>> {
        debug!("SELECT book {}", id);
        let fields = self
            .conn
            .query_row(
                r#"
                SELECT title, description, status, pct_read, start_read_date, end_read_date
                FROM books WHERE id = ?1
                "#,
                [id],
                |row| fields_from_row(row, 0),
            )
            .optional()?;
        Ok(fields)
    }

    /// Set one field. Returns the id, or `None` if no row matched.
    pub fn update_field(&self, id: i64, update: &FieldUpdate) -> Result<Option<i64>> {
        debug!("UPDATE book {} field {}", id, update.field());
        let changed = self
            .conn
            .execute(update.field().update_sql(), params![update.value(), id])?;
        Ok((changed > 0).then_some(id))
    }

    /// Delete one book. Returns the id, or `None` if no row matched.
    pub fn delete_by_id(&self, id: i64) -> Result<Option<i64>> {
        debug!("DELETE book {}", id);
        let changed = self.conn.execute("DELETE FROM books WHERE id = ?1", [id])?;
        Ok((changed > 0).then_some(id))
    }

    /// Remove every row and restart id assignment at 1.
    pub fn truncate(&self) -> Result<()> {
        debug!("TRUNCATE books");
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM books", [])?;
        tx.execute("DELETE FROM sqlite_sequence WHERE name = 'books'", [])?;
        tx.commit()?;
        Ok(())
    }

    /// Every row with column metadata.
    pub fn view_all(&self) -> Result<Table> {
        self.query_table(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"), [])
    }

    /// Every row as typed books.
    pub fn list_books(&self) -> Result<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))?;
        let rows = stmt.query_map([], |row| {
            Ok(Book {
                id: row.get(0)?,
                username: row.get(1)?,
                fields: fields_from_row(row, 2)?,
            })
        })?;

        let mut books = Vec::new();
        for row in rows {
            books.push(row?);
        }
        Ok(books)
    }

    /// All rows with the given status.
    pub fn list_by_status(&self, status: BookStatus) -> Result<Table> {
        self.query_table(
            &format!("SELECT {BOOK_COLUMNS} FROM books WHERE status = ?1 ORDER BY id"),
            [status],
        )
    }

    /// Complete books read within `[start, end]`.
    pub fn list_completed_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Table> {
        self.query_table(
            &format!(
                "SELECT {BOOK_COLUMNS} FROM books \
                 WHERE status = ?1 AND start_read_date >= ?2 AND end_read_date <= ?3 \
                 ORDER BY id"
            ),
            params![BookStatus::Complete, start, end],
        )
    }

    /// Count complete books with `start_read_date >= start` and `end_read_date <= end`.
    pub fn count_completed_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<i64> {
        debug!("COUNT complete books between {} and {}", start, end);
        let count = self.conn.query_row(
            r#"
            SELECT COUNT(*) FROM books
            WHERE status = ?1 AND start_read_date >= ?2 AND end_read_date <= ?3
            "#,
            params![BookStatus::Complete, start, end],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Count books with the given status.
    pub fn count_by_status(&self, status: BookStatus) -> Result<i64> {
        debug!("COUNT {} books", status);
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM books WHERE status = ?1", [status], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_pending(&self) -> Result<i64> {
        self.count_by_status(BookStatus::Pending)
    }

    /// Books whose title contains `keyword`, ignoring case.
    ///
    /// Both sides go through `casefold` and the keyword is bound as a
    /// parameter, so it always matches as literal text.
    pub fn search_by_title(&self, keyword: &str) -> Result<Table> {
        debug!("SEARCH books by title keyword {:?}", keyword);
        self.query_table(
            &format!(
                "SELECT {BOOK_COLUMNS} FROM books \
                 WHERE instr(casefold(title), casefold(?1)) > 0 \
                 ORDER BY id"
            ),
            [keyword],
        )
    }

    fn query_table<P: Params>(&self, sql: &str, params: P) -> Result<Table> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let width = columns.len();
        let mut table = Table::new(columns);

        let mut rows = stmt.query(params)?;
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for idx in 0..width {
                cells.push(display_value(row.get_ref(idx)?));
            }
            table.push_row(cells);
        }
        Ok(table)
    }
}

fn fields_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<BookFields> {
    Ok(BookFields {
        title: row.get(offset)?,
        description: row.get(offset + 1)?,
        status: row.get(offset + 2)?,
        pct_read: row.get(offset + 3)?,
        start_read_date: row.get(offset + 4)?,
        end_read_date: row.get(offset + 5)?,
    })
}

fn display_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(n) => n.to_string(),
        ValueRef::Real(x) => x.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}
