pub mod app;
pub mod cli;
pub mod data;
pub mod ui;
