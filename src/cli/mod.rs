//! Command-line interface wiring for the `userstore` binary.
//!
//! Flags are collected as plain strings; checking them is left to
//! [`userstore::perform`].

use clap::Parser;
use userstore::Arguments;

/// Parsed CLI entrypoint for the `userstore` binary.
#[derive(Parser, Debug)]
#[command(
    name = "userstore",
    version,
    about = "Add, list, find and remove user records in a JSON file"
)]
pub struct Cli {
    /// The id of the user.
    #[arg(long, default_value = "")]
    pub id: String,

    /// Operation type: add | list | findById | remove
    #[arg(long, default_value = "")]
    pub operation: String,

    /// The user data, e.g. '{"id":"1","email":"a@x.com","age":30}'
    #[arg(long, default_value = "")]
    pub item: String,

    /// Path of the JSON record file (created if missing).
    #[arg(long = "fileName", alias = "file-name", default_value = "")]
    pub file_name: String,
}

impl From<Cli> for Arguments {
    fn from(cli: Cli) -> Arguments {
        Arguments {
            id: cli.id,
            operation: cli.operation,
            item: cli.item,
            file_name: cli.file_name,
        }
    }
}
