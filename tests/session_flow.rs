//! Interactive session integration tests
//!
//! Drives the menu controller with scripted input and checks both what it
//! printed and what ended up in the database.

use readlog::domain::{BookStatus, NewBook};
use readlog::error::{ReadlogError, Result};
use readlog::library::Library;
use readlog::session::{Controller, Prompter};
use readlog::store::Database;

fn run_session(db: &Database, script: &str) -> (Result<()>, String) {
    let prompter = Prompter::new(script.as_bytes(), Vec::new());
    let mut controller = Controller::new(db, "sophie", prompter);
    let result = controller.run();
    let output = String::from_utf8(controller.into_output()).expect("utf8 output");
    (result, output)
}

fn seed(db: &Database) -> Result<()> {
    let library = Library::new(db);
    library.add_book("sophie", NewBook::new("Dune"))?;
    library.add_book("sophie", NewBook::new("The Dune Chronicles").with_status(BookStatus::Reading))?;
    library.add_book(
        "sophie",
        NewBook::new("Foundation")
            .with_status(BookStatus::Complete)
            .with_pct_read(100)
            .with_dates(
                Some(readlog::domain::parse_date("2023-02-01")?),
                Some(readlog::domain::parse_date("2023-03-01")?),
            ),
    )?;
    Ok(())
}

#[test]
fn test_query_menu_reports() -> Result<()> {
    let db = Database::open_in_memory()?;
    seed(&db)?;

    let script = "1\n1\n2023-01-01\n2023-12-31\n2\n3\ndune\n77\n99\n";
    let (result, output) = run_session(&db, script);
    result?;

    assert!(output.contains("Number of completely read books between 2023-01-01 and 2023-12-31: 1"));
    assert!(output.contains("We currently have: 1 pending book(s)."));
    assert!(output.contains("Here is the requested information based on keyword: dune"));
    assert!(output.contains("The Dune Chronicles"));
    assert!(output.contains("Loading Main Menu..."));
    Ok(())
}

#[test]
fn test_bad_range_dates_reprompt() -> Result<()> {
    let db = Database::open_in_memory()?;
    seed(&db)?;

    let script = "1\n1\n01/01/2023\n2023-01-01\n2023-12-31\n99\n";
    let (result, output) = run_session(&db, script);
    result?;

    assert!(output.contains("'01/01/2023' is not a date in YYYY-MM-DD form"));
    assert!(output.contains("between 2023-01-01 and 2023-12-31: 1"));
    Ok(())
}

#[test]
fn test_search_folds_accented_titles() -> Result<()> {
    let db = Database::open_in_memory()?;
    let library = Library::new(&db);
    library.add_book("sophie", NewBook::new("Éducation sentimentale"))?;
    library.add_book("sophie", NewBook::new("Dune"))?;

    let (result, output) = run_session(&db, "1\n3\néDUCATION\n99\n");
    result?;

    assert!(output.contains("Éducation sentimentale"));
    assert!(!output.contains("│ Dune"));
    Ok(())
}

#[test]
fn test_invalid_query_choice_stays_in_menu() -> Result<()> {
    let db = Database::open_in_memory()?;
    let (result, output) = run_session(&db, "1\n8\nseven\n99\n");
    result?;

    assert_eq!(output.matches("Invalid choice. Please try again.").count(), 2);
    assert_eq!(output.matches("MENU > DATA QUERY").count(), 3);
    Ok(())
}

#[test]
fn test_update_flow() -> Result<()> {
    let db = Database::open_in_memory()?;
    seed(&db)?;

    // id 9 is missing, then id 1; field 4 (percentage) with a bad value first
    let script = "2\n2\n9\n1\n4\nmost\n60\n99\n";
    let (result, output) = run_session(&db, script);
    result?;

    assert!(output.contains("Book does not exist in DB. Please try again"));
    assert!(output.contains("Book Information:"));
    assert!(output.contains("'most' is not a whole number"));
    assert!(output.contains("Record with id 1 updated successfully."));

    let fields = Library::new(&db).book(1)?;
    assert_eq!(fields.pct_read, 60);
    assert_eq!(fields.title, "Dune");
    Ok(())
}

#[test]
fn test_update_invalid_field_choice_reshows_field_menu() -> Result<()> {
    let db = Database::open_in_memory()?;
    seed(&db)?;

    let script = "2\n2\n2\n12\n3\ncomplete\n99\n";
    let (result, output) = run_session(&db, script);
    result?;

    assert_eq!(output.matches("Fields to update:").count(), 2);
    assert_eq!(Library::new(&db).book(2)?.status, BookStatus::Complete);
    Ok(())
}

#[test]
fn test_delete_flow() -> Result<()> {
    let db = Database::open_in_memory()?;
    seed(&db)?;

    let script = "2\n3\n2\n1\n99\n";
    let (result, output) = run_session(&db, script);
    result?;

    assert!(output.contains("Delete Options:"));
    assert!(output.contains("Record with id 2 deleted successfully."));
    assert!(matches!(Library::new(&db).book(2), Err(ReadlogError::NotFound(2))));
    assert_eq!(Library::new(&db).books()?.len(), 2);
    Ok(())
}

#[test]
fn test_delete_back_keeps_row() -> Result<()> {
    let db = Database::open_in_memory()?;
    seed(&db)?;

    let (result, output) = run_session(&db, "2\n3\n2\n77\n99\n");
    result?;

    assert!(output.contains("Loading Data Manipulation Menu..."));
    assert_eq!(Library::new(&db).books()?.len(), 3);
    Ok(())
}

#[test]
fn test_quit_from_delete_options_keeps_row() -> Result<()> {
    let db = Database::open_in_memory()?;
    seed(&db)?;

    let (result, output) = run_session(&db, "2\n3\n1\n99\n");
    result?;

    assert!(output.contains("Delete Options:"));
    assert!(!output.contains("deleted successfully"));
    assert!(output.contains("Exiting the program..."));
    assert_eq!(Library::new(&db).book(1)?.title, "Dune");
    assert_eq!(Library::new(&db).books()?.len(), 3);
    Ok(())
}

#[test]
fn test_truncate_only_on_yes() -> Result<()> {
    let db = Database::open_in_memory()?;
    seed(&db)?;

    let script = "2\n4\nfoo\n1\nmaybe\n1\nNo\n99\n";
    let (result, output) = run_session(&db, script);
    result?;

    assert_eq!(output.matches("Invalid choice. Please try again.").count(), 1);
    assert_eq!(output.matches("Please answer yes or no.").count(), 1);
    assert_eq!(output.matches("Truncate Options:").count(), 4);
    assert!(!output.contains("Table successfully truncated."));
    assert!(output.contains("Exiting the program..."));
    assert_eq!(Library::new(&db).books()?.len(), 3);
    Ok(())
}

#[test]
fn test_truncate_back_returns_to_manipulation_menu() -> Result<()> {
    let db = Database::open_in_memory()?;
    seed(&db)?;

    let (result, output) = run_session(&db, "2\n4\n77\n99\n");
    result?;

    assert!(output.contains("Loading Data Manipulation Menu..."));
    assert_eq!(output.matches("MENU > DATA MANIPULATION").count(), 2);
    assert!(output.contains("Exiting the program..."));
    assert_eq!(Library::new(&db).books()?.len(), 3);
    Ok(())
}

#[test]
fn test_truncate_yes_then_insert_restarts_ids() -> Result<()> {
    let db = Database::open_in_memory()?;
    seed(&db)?;

    let script = "2\n4\n1\nyes\n1\nEmma\n\n\n\n\n\n5\n99\n";
    let (result, output) = run_session(&db, script);
    result?;

    assert!(output.contains("Table successfully truncated."));
    assert!(output.contains("Record with id 1 inserted successfully."));

    let books = Library::new(&db).books()?;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, 1);
    assert_eq!(books[0].fields.title, "Emma");
    Ok(())
}

#[test]
fn test_view_table_lists_all_columns() -> Result<()> {
    let db = Database::open_in_memory()?;
    seed(&db)?;

    let (result, output) = run_session(&db, "2\n5\n99\n");
    result?;

    for column in ["id", "username", "pct_read", "start_read_date", "end_read_date"] {
        assert!(output.contains(column), "missing column {column}");
    }
    assert!(output.contains("Foundation"));
    Ok(())
}

#[test]
fn test_session_without_quit_fails_when_input_ends() {
    let db = Database::open_in_memory().expect("db");
    let (result, _) = run_session(&db, "2\n1\nDune\n");
    assert!(matches!(result, Err(ReadlogError::InputClosed)));
}
