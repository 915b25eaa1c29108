//! Menu text for every level of the session.

use colored::*;

use crate::domain::BookField;

pub fn main_menu() -> String {
    format!(
        "\n{}\n\n{}\n{}\n{}\n{}\n{}\n",
        "WELCOME TO READLOG".bold(),
        "    MAIN MENU".bold(),
        "------------------".bold(),
        "1. DATA QUERY".blue().bold(),
        "2. DATA MANIPULATION".yellow(),
        "99. Quit".red().bold(),
    )
}

pub fn data_query_menu() -> String {
    let body = [
        "MENU > DATA QUERY",
        "-----------------",
        "1. How many books were completely read during a specific amount of time?",
        "2. How many books do we have pending?",
        "3. Search books by title",
        "77. Back to Menu",
        "99. Quit",
    ];
    format!("\n{}\n", body.join("\n").blue().bold())
}

pub fn data_manipulation_menu() -> String {
    let body = [
        "MENU > DATA MANIPULATION",
        "------------------------",
        "1. INSERT DATA",
        "2. UPDATE DATA",
        "3. DELETE DATA",
        "4. TRUNCATE",
        "5. VIEW TABLE",
        "77. Back to Menu",
        "99. Quit",
    ];
    format!("\n{}\n", body.join("\n").yellow())
}

/// The field list is generated from `BookField::ALL`, so numbering always
/// matches `BookField::from_menu_choice`.
pub fn update_field_menu() -> String {
    let mut lines = vec!["Fields to update:".to_string(), "------------------".to_string()];
    for (idx, field) in BookField::ALL.iter().enumerate() {
        lines.push(format!("{}. {}", idx + 1, field.label()));
    }
    lines.push("77. Back to Menu".to_string());
    lines.push("99. Quit".to_string());
    format!("\n{}\n", lines.join("\n"))
}

pub fn delete_menu() -> String {
    let body = ["Delete Options:", "---------------", "1. Delete Row", "77. Back to Menu", "99. Quit"];
    format!("\n{}\n", body.join("\n"))
}

pub fn truncate_menu() -> String {
    let body = [
        "Truncate Options:",
        "-----------------",
        "1. Truncate Table (clear all rows)",
        "77. Back to Menu",
        "99. Quit",
    ];
    format!("\n{}\n", body.join("\n"))
}
