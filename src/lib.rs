// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) connects to the database and hands the store to the UI loop.
//
// Module responsibilities:
// - `config`: connection settings read from the environment.
// - `db`: the `Store` handle and every query the tool runs.
// - `models`: table rows and the read models printed to the user.
// - `validate`: field predicates shared by prompts and the store.
// - `menu`: the closed set of menu actions.
// - `prompts`: selection lists and `dialoguer` input helpers.
// - `table`: plain-text rendering of query results.
// - `ui`: the menu loop and one handler per action.
pub mod config;
pub mod db;
pub mod error;
pub mod menu;
pub mod models;
pub mod prompts;
pub mod table;
pub mod ui;
pub mod validate;

pub use error::{Error, Result};
