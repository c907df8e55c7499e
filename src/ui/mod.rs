//! Console front-end: prompts, menus and result tables.

pub mod menu;
pub mod prompt;
pub mod table;
