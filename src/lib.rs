//! Core library for the flat-file user record store.

mod args;
mod dispatch;
mod error;
mod operation;
mod store;
mod user;

pub use args::Arguments;
pub use dispatch::perform;
pub use error::{Result, StoreError};
pub use operation::{Operation, add, find_by_id, list, remove};
pub use store::{LoadOutcome, RecordStore};
pub use user::User;
