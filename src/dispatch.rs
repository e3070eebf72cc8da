use std::io::Write;

use crate::args::Arguments;
use crate::error::{Result, StoreError};
use crate::operation::Operation;
use crate::store::RecordStore;

/// Validate `args`, make sure the target file exists and run the requested operation.
///
/// The operation name is checked before the file name, and both before any
/// file is touched. The handle opened to create the file stays open until the
/// operation returns.
pub fn perform<W: Write + ?Sized>(args: &Arguments, out: &mut W) -> Result<()> {
    if args.operation.is_empty() {
        return Err(StoreError::MissingFlag("-operation"));
    }
    let operation: Operation = args.operation.parse()?;
    if args.file_name.is_empty() {
        return Err(StoreError::MissingFlag("-fileName"));
    }

    let _handle = RecordStore::new(&args.file_name).ensure_exists()?;
    tracing::debug!(%operation, file = %args.file_name, "dispatching");
    operation.run(args, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_operation_is_reported_first() {
        let err = perform(&Arguments::default(), &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.to_string(), "-operation flag has to be specified");
    }

    #[test]
    fn unknown_operation_is_rejected_before_file_check() {
        let args = Arguments::default().with_operation("update");
        let err = perform(&args, &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.to_string(), "Operation update not allowed!");
    }

    #[test]
    fn missing_file_name_is_reported() {
        let args = Arguments::default().with_operation("list");
        let err = perform(&args, &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.to_string(), "-fileName flag has to be specified");
    }

    #[test]
    fn creates_the_file_before_running() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let args = Arguments::default()
            .with_operation("list")
            .with_file_name(path.to_string_lossy());

        let mut out: Vec<u8> = Vec::new();
        perform(&args, &mut out).unwrap();

        assert!(path.exists());
        assert_eq!(out, b"[]".to_vec());
    }

    #[test]
    fn unopenable_path_propagates_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("users.json");
        let args = Arguments::default()
            .with_operation("list")
            .with_file_name(path.to_string_lossy());
        let err = perform(&args, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
