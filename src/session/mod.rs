//! Interactive terminal session.
//!
//! `Controller` drives the nested numbered menus, `Prompter` does the line
//! I/O, and `menus` holds the text of each menu.

pub mod controller;
pub mod menus;
pub mod prompt;

pub use controller::{BACK, Controller, Menu, QUIT, Transition};
pub use prompt::Prompter;
