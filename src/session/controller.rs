//! The menu state machine.
//!
//! The session starts at the main menu and moves between three menus on
//! numeric choices. Leaf operations run inside the current menu and report
//! what they did; update, delete and truncate have their own small option
//! menus. `99` at any level ends the session. A failed operation is printed
//! and the current menu is shown again.

use colored::*;
use log::{info, warn};
use std::io::{BufRead, Write};

use super::menus;
use super::prompt::Prompter;
use crate::domain::{
    BookField, BookFields, BookStatus, FieldUpdate, NewBook, parse_date, parse_optional_date, parse_pct_read,
};
use crate::error::{ReadlogError, Result};
use crate::library::Library;
use crate::store::Database;
use crate::table::Table;

/// Choice that leaves a sub-menu for its parent.
pub const BACK: u32 = 77;
/// Choice that ends the session from any menu.
pub const QUIT: u32 = 99;

const CHOOSE: &str = "Choose an option to continue: ";

/// The three menu levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Main,
    DataQuery,
    DataManipulation,
}

impl Menu {
    pub fn title(&self) -> &'static str {
        match self {
            Menu::Main => "Main Menu",
            Menu::DataQuery => "Data Query Menu",
            Menu::DataManipulation => "Data Manipulation Menu",
        }
    }

    pub fn render(&self) -> String {
        match self {
            Menu::Main => menus::main_menu(),
            Menu::DataQuery => menus::data_query_menu(),
            Menu::DataManipulation => menus::data_manipulation_menu(),
        }
    }
}

/// What the session does after handling a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Show the current menu again
    Stay,
    /// Switch to another menu
    Enter(Menu),
    /// End the session
    Quit,
}

pub struct Controller<'db, R, W> {
    library: Library<'db>,
    prompter: Prompter<R, W>,
    username: String,
}

impl<'db, R: BufRead, W: Write> Controller<'db, R, W> {
    pub fn new(db: &'db Database, username: impl Into<String>, prompter: Prompter<R, W>) -> Self {
        Self {
            library: Library::new(db),
            prompter,
            username: username.into(),
        }
    }

    /// Run until the user quits. Errors only when input or output fails.
    pub fn run(&mut self) -> Result<()> {
        let mut menu = Menu::Main;
        info!("Session started for {}", self.username);

        loop {
            self.prompter.say(menu.render())?;
            let choice = self.prompter.ask_choice(CHOOSE)?;

            let transition = match self.dispatch(menu, choice) {
                Ok(transition) => transition,
                Err(e) if e.is_recoverable() => {
                    warn!("{} operation failed: {}", menu.title(), e);
                    self.prompter.say(format!("\n{e}").red().bold())?;
                    Transition::Stay
                }
                Err(e) => return Err(e),
            };

            match transition {
                Transition::Stay => {}
                Transition::Enter(next) => {
                    info!("{} -> {}", menu.title(), next.title());
                    self.prompter.say(format!("\nLoading {}...", next.title()).green().bold())?;
                    menu = next;
                }
                Transition::Quit => {
                    info!("Session ended from {}", menu.title());
                    self.prompter.say("\nExiting the program...".red().bold())?;
                    return Ok(());
                }
            }
        }
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    fn dispatch(&mut self, menu: Menu, choice: Option<u32>) -> Result<Transition> {
        match menu {
            Menu::Main => self.main_choice(choice),
            Menu::DataQuery => self.query_choice(choice),
            Menu::DataManipulation => self.manipulation_choice(choice),
        }
    }

    fn main_choice(&mut self, choice: Option<u32>) -> Result<Transition> {
        match choice {
            Some(1) => Ok(Transition::Enter(Menu::DataQuery)),
            Some(2) => Ok(Transition::Enter(Menu::DataManipulation)),
            Some(QUIT) => Ok(Transition::Quit),
            _ => self.invalid_choice(),
        }
    }

    fn query_choice(&mut self, choice: Option<u32>) -> Result<Transition> {
        match choice {
            Some(1) => self.count_completed(),
            Some(2) => self.count_pending(),
            Some(3) => self.search_titles(),
            Some(BACK) => Ok(Transition::Enter(Menu::Main)),
            Some(QUIT) => Ok(Transition::Quit),
            _ => self.invalid_choice(),
        }
    }

    fn manipulation_choice(&mut self, choice: Option<u32>) -> Result<Transition> {
        match choice {
            Some(1) => self.insert_book(),
            Some(2) => self.update_book(),
            Some(3) => self.delete_book(),
            Some(4) => self.truncate_books(),
            Some(5) => self.view_table(),
            Some(BACK) => Ok(Transition::Enter(Menu::Main)),
            Some(QUIT) => Ok(Transition::Quit),
            _ => self.invalid_choice(),
        }
    }

    fn invalid_choice(&mut self) -> Result<Transition> {
        self.prompter.say("\nInvalid choice. Please try again.".red().bold())?;
        Ok(Transition::Stay)
    }

    fn show_table(&mut self, table: &Table) -> Result<()> {
        self.prompter.say(table)
    }

    fn count_completed(&mut self) -> Result<Transition> {
        let start = self.prompter.ask_until("\nEnter the start date (YYYY-MM-DD): ", parse_date)?;
        let end = self.prompter.ask_until("Enter the end date (YYYY-MM-DD): ", parse_date)?;

        let report = self.library.completed_between(start, end)?;
        self.show_table(&report.books)?;
        self.prompter.say(
            format!(
                "\nNumber of completely read books between {} and {}: {}",
                report.start, report.end, report.count
            )
            .magenta()
            .bold(),
        )?;
        Ok(Transition::Stay)
    }

    fn count_pending(&mut self) -> Result<Transition> {
        let report = self.library.pending()?;
        self.show_table(&report.books)?;
        self.prompter.say(
            format!("\nWe currently have: {} pending book(s).", report.count)
                .magenta()
                .bold(),
        )?;
        Ok(Transition::Stay)
    }

    fn search_titles(&mut self) -> Result<Transition> {
        let keyword = self.prompter.ask("\nEnter the title keyword: ")?;
        let found = self.library.search(&keyword)?;
        self.prompter.say(
            format!("\nHere is the requested information based on keyword: {keyword}\n")
                .magenta()
                .bold(),
        )?;
        self.show_table(&found)?;
        Ok(Transition::Stay)
    }

    fn insert_book(&mut self) -> Result<Transition> {
        self.prompter.say("Please provide the following details: ".bold())?;
        let title = self.prompter.ask_until("Book title: ", |raw| {
            if raw.is_empty() {
                Err(ReadlogError::validation("a book title is required"))
            } else {
                Ok(raw.to_string())
            }
        })?;
        let description = self.prompter.ask("(Optional) Book description: ")?;
        let status = self.prompter.ask_until(
            "(Optional) What is your current read status?(pending, reading, complete): ",
            |raw| {
                if raw.is_empty() {
                    Ok(None)
                } else {
                    raw.parse::<BookStatus>().map(Some)
                }
            },
        )?;
        let pct_read = self
            .prompter
            .ask_until("(Optional) What percentage read?: ", |raw| {
                if raw.is_empty() { Ok(None) } else { parse_pct_read(raw).map(Some) }
            })?;
        let start = self
            .prompter
            .ask_until("(Optional) Start reading date(YYYY-MM-DD): ", parse_optional_date)?;
        let end = self
            .prompter
            .ask_until("(Optional) End reading date(YYYY-MM-DD): ", parse_optional_date)?;

        let book = NewBook {
            title,
            description: (!description.is_empty()).then_some(description),
            status,
            pct_read,
            start_read_date: start,
            end_read_date: end,
        };
        let id = self.library.add_book(&self.username, book)?;
        self.prompter
            .say(format!("Record with id {id} inserted successfully.").green().bold())?;
        Ok(Transition::Stay)
    }

    /// Ask for an id until it names an existing book. Blank input gives up.
    fn ask_existing_book(&mut self, label: &str) -> Result<Option<(i64, BookFields)>> {
        loop {
            let raw = self.prompter.ask(label)?;
            if raw.is_empty() {
                return Ok(None);
            }
            let Ok(id) = raw.parse::<i64>() else {
                self.prompter
                    .say(format!("'{raw}' is not a valid book id. Please try again").red().bold())?;
                continue;
            };
            match self.library.book(id) {
                Ok(fields) => return Ok(Some((id, fields))),
                Err(ReadlogError::NotFound(_)) => {
                    self.prompter
                        .say("\nBook does not exist in DB. Please try again".red().bold())?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn show_book(&mut self, fields: &BookFields) -> Result<()> {
        self.prompter.say("\nBook Information:".bold())?;
        self.show_table(&Table::from_fields(fields))
    }

    fn update_book(&mut self) -> Result<Transition> {
        let Some((id, fields)) = self.ask_existing_book("Input book id to update (blank to go back): ")? else {
            return Ok(Transition::Stay);
        };
        self.show_book(&fields)?;

        let field = loop {
            self.prompter.say(menus::update_field_menu())?;
            match self.prompter.ask_choice("Which field do you wish to update? ")? {
                Some(BACK) => return Ok(Transition::Enter(Menu::DataManipulation)),
                Some(QUIT) => return Ok(Transition::Quit),
                Some(n) => match BookField::from_menu_choice(n) {
                    Some(field) => break field,
                    None => {
                        self.invalid_choice()?;
                    }
                },
                None => {
                    self.invalid_choice()?;
                }
            }
        };

        let update = self
            .prompter
            .ask_until(field.value_prompt(), |raw| FieldUpdate::parse(field, raw))?;
        match self.library.update_book(id, &update) {
            Ok(id) => self
                .prompter
                .say(format!("Record with id {id} updated successfully.").green().bold())?,
            Err(ReadlogError::NotFound(_)) => self.prompter.say("Update failed.".red().bold())?,
            Err(e) => return Err(e),
        }
        Ok(Transition::Stay)
    }

    fn delete_book(&mut self) -> Result<Transition> {
        let Some((id, fields)) = self.ask_existing_book("Input book id to delete (blank to go back): ")? else {
            return Ok(Transition::Stay);
        };
        self.show_book(&fields)?;

        loop {
            self.prompter.say(menus::delete_menu())?;
            match self.prompter.ask_choice(CHOOSE)? {
                Some(1) => {
                    match self.library.remove_book(id) {
                        Ok(id) => self
                            .prompter
                            .say(format!("\nRecord with id {id} deleted successfully.").green().bold())?,
                        Err(ReadlogError::NotFound(_)) => self.prompter.say("Delete failed.".red().bold())?,
                        Err(e) => return Err(e),
                    }
                    return Ok(Transition::Stay);
                }
                Some(BACK) => return Ok(Transition::Enter(Menu::DataManipulation)),
                Some(QUIT) => return Ok(Transition::Quit),
                _ => {
                    self.invalid_choice()?;
                }
            }
        }
    }

    fn truncate_books(&mut self) -> Result<Transition> {
        loop {
            self.prompter.say("\nTable Information:".bold())?;
            let table = self.library.table()?;
            self.show_table(&table)?;
            self.prompter.say(menus::truncate_menu())?;

            match self.prompter.ask_choice(CHOOSE)? {
                Some(1) => {
                    let answer = self
                        .prompter
                        .ask("Are you sure? (This will delete all rows)(yes/no): ")?
                        .to_ascii_lowercase();
                    match answer.as_str() {
                        "yes" => {
                            self.library.clear()?;
                            self.prompter.say("Table successfully truncated.".green().bold())?;
                            return Ok(Transition::Stay);
                        }
                        "no" => {}
                        _ => self.prompter.say("Please answer yes or no.".red().bold())?,
                    }
                }
                Some(BACK) => return Ok(Transition::Enter(Menu::DataManipulation)),
                Some(QUIT) => return Ok(Transition::Quit),
                _ => {
                    self.invalid_choice()?;
                }
            }
        }
    }

    fn view_table(&mut self) -> Result<Transition> {
        let table = self.library.table()?;
        self.show_table(&table)?;
        Ok(Transition::Stay)
    }
}
