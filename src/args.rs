//! Resolved invocation options handed to the dispatcher.

/// The four string options an invocation can carry. Absent options are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    pub id: String,
    pub operation: String,
    pub item: String,
    pub file_name: String,
}

impl Arguments {
    /// Look an option up by its flag name (`id`, `operation`, `item`, `fileName`).
    ///
    /// Unknown names resolve to the empty string, same as an option that was not given.
    pub fn get(&self, name: &str) -> &str {
        match name {
            "id" => &self.id,
            "operation" => &self.operation,
            "item" => &self.item,
            "fileName" => &self.file_name,
            _ => "",
        }
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_operation<S: Into<String>>(mut self, operation: S) -> Self {
        self.operation = operation.into();
        self
    }

    pub fn with_item<S: Into<String>>(mut self, item: S) -> Self {
        self.item = item.into();
        self
    }

    pub fn with_file_name<S: Into<String>>(mut self, file_name: S) -> Self {
        self.file_name = file_name.into();
        self
    }
}
