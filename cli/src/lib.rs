pub mod cli;
pub mod menu;
pub mod prompt;
pub mod report;
pub mod shell;
