//! Reading and writing fragment and combined documents.
//!
//! Both kinds of document are JSON objects. Objects keep their insertion
//! order, so a rewritten fragment lists its languages and keys in the order
//! they were read, followed by anything newly inserted.

use std::fs;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};
use tempfile::{
    Builder,
    NamedTempFile,
};
use thiserror::Error;

/// An ordered JSON object.
pub type JsonObject = Map<String, Value>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object at the top level of {}", path.display())]
    NotAnObject { path: PathBuf },

    #[error("Failed to serialize {}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads a JSON document whose top level must be an object.
///
/// A leading byte order mark is skipped.
///
/// # Errors
/// Returns error if file read or JSON parse fails, or the document is not an object.
pub fn read_object(path: &Path) -> Result<JsonObject, DocumentError> {
    let content = fs::read_to_string(path)
        .map_err(|source| DocumentError::Read { path: path.to_path_buf(), source })?;

    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let json: Value = serde_json::from_str(content)
        .map_err(|source| DocumentError::Parse { path: path.to_path_buf(), source })?;

    match json {
        Value::Object(object) => Ok(object),
        _ => Err(DocumentError::NotAnObject { path: path.to_path_buf() }),
    }
}

/// Serializes a value as indented (`pretty`) or single-line JSON.
///
/// Indented output ends with a newline.
///
/// # Errors
/// Returns error if the value cannot be serialized.
pub fn to_json_string(value: &Value, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        let mut text = serde_json::to_string_pretty(value)?;
        text.push('\n');
        Ok(text)
    } else {
        serde_json::to_string(value)
    }
}

/// Writes `value` to `path`, replacing any existing file.
///
/// The text goes to a temporary file in the same directory which is then
/// renamed over `path`, so readers never observe a half-written document.
/// A symlink at `path` is written through and stays a symlink. An existing
/// file keeps its permissions.
///
/// # Errors
/// Returns error if serialization or any filesystem step fails.
pub fn write_json(path: &Path, value: &Value, pretty: bool) -> Result<(), DocumentError> {
    let text = to_json_string(value, pretty)
        .map_err(|source| DocumentError::Serialize { path: path.to_path_buf(), source })?;

    let write_error = |source| DocumentError::Write { path: path.to_path_buf(), source };

    let target = if path.is_symlink() {
        fs::canonicalize(path).map_err(write_error)?
    } else {
        path.to_path_buf()
    };
    let directory = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = temp_file_in(directory).map_err(write_error)?;
    if let Ok(metadata) = fs::metadata(&target) {
        file.as_file().set_permissions(metadata.permissions()).map_err(write_error)?;
    }
    file.write_all(text.as_bytes()).map_err(write_error)?;
    file.persist(&target).map_err(|e| write_error(e.error))?;

    Ok(())
}

/// Temporary file created with the mode a plain `fs::write` would use.
fn temp_file_in(directory: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(directory)
}

/// Text of a JSON value as it appears inside a placeholder.
///
/// Strings contribute their contents and other scalars their JSON text.
/// Objects and arrays have no text of their own.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => String::new(),
        other => other.to_string(),
    }
}
