//! The four record operations and their selection by name.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::args::Arguments;
use crate::error::{Result, StoreError};
use crate::store::RecordStore;
use crate::user::User;

/// Closed set of operations an invocation may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    List,
    FindById,
    Remove,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::List,
        Operation::FindById,
        Operation::Remove,
    ];

    /// Name as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::List => "list",
            Operation::FindById => "findById",
            Operation::Remove => "remove",
        }
    }

    /// Run the operation against the file named in `args`, writing results to `out`.
    pub fn run<W: Write + ?Sized>(self, args: &Arguments, out: &mut W) -> Result<()> {
        let store = RecordStore::new(&args.file_name);
        match self {
            Operation::Add => add(&store, &args.item, out),
            Operation::List => list(&store, out),
            Operation::FindById => find_by_id(&store, &args.id, out),
            Operation::Remove => remove(&store, &args.id, out),
        }
    }
}

impl FromStr for Operation {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| StoreError::OperationNotAllowed(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Append the user encoded in `item` to the collection.
///
/// An existing record with the same id produces a notice, but the new record
/// is still appended. The record is saved even if the notice cannot be
/// written; that write error is returned afterwards.
pub fn add<W: Write + ?Sized>(store: &RecordStore, item: &str, out: &mut W) -> Result<()> {
    if item.is_empty() {
        return Err(StoreError::MissingFlag("-item"));
    }
    let freshman: User = serde_json::from_str::<Option<User>>(item)
        .map_err(StoreError::Payload)?
        .unwrap_or_default();

    let mut users = store.load();
    let duplicates = users.iter().filter(|user| user.id == freshman.id).count();
    let mut notice: Result<()> = Ok(());
    for _ in 0..duplicates {
        tracing::info!(id = %freshman.id, "adding record with duplicate id");
        if notice.is_ok() {
            notice = write_notice(out, &format!("Item with id {} already exists", freshman.id));
        }
    }

    users.push(freshman);
    store.save(&users)?;
    notice
}

/// Copy the file to `out` untouched, or `[]` when it is empty.
pub fn list<W: Write + ?Sized>(store: &RecordStore, out: &mut W) -> Result<()> {
    let data = store.read_raw()?;
    if data.is_empty() {
        write_notice(out, "[]")
    } else {
        out.write_all(&data).map_err(output_error)
    }
}

/// Write the first record whose id matches, or nothing at all when none does.
pub fn find_by_id<W: Write + ?Sized>(store: &RecordStore, id: &str, out: &mut W) -> Result<()> {
    if id.is_empty() {
        return Err(StoreError::MissingFlag("-id"));
    }
    let users = store.load();
    match users.iter().find(|user| user.id == id) {
        Some(user) => {
            let encoded = serde_json::to_vec(user).map_err(StoreError::Serialize)?;
            out.write_all(&encoded).map_err(output_error)
        }
        None => {
            tracing::debug!(%id, "no record matched");
            Ok(())
        }
    }
}

/// Drop the last record whose id matches and rewrite the file.
pub fn remove<W: Write + ?Sized>(store: &RecordStore, id: &str, out: &mut W) -> Result<()> {
    if id.is_empty() {
        return Err(StoreError::MissingFlag("-id"));
    }
    let mut users = store.load();
    let Some(index) = users.iter().rposition(|user| user.id == id) else {
        return write_notice(out, &format!("Item with id {} not found", id));
    };
    users.remove(index);
    store.save(&users)
}

fn write_notice<W: Write + ?Sized>(out: &mut W, message: &str) -> Result<()> {
    out.write_all(message.as_bytes()).map_err(output_error)
}

fn output_error(err: std::io::Error) -> StoreError {
    StoreError::io("failed to write output to", "<output>", err)
}
