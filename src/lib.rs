//! ado: a folder-based todo list for the command line.
//!
//! Todos live in named folders, may carry due/remind dates, and can be
//! grouped under a parent todo ("project"). The command grammar is
//! deliberately loose: keywords abbreviate (`ado l tod/`), date tags
//! and `[project]` references can sit anywhere in the input, and
//! whatever is left becomes the todo's text. The [`parser`] module is
//! the engine behind that grammar; [`cli`] wires it to the commands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod parser;
