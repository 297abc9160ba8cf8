//! Canonical file metadata and the mapping from raw listing entries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout in listing entries, e.g. `2024-01-01T00:00:00.000000`.
/// No zone offset; the API reports UTC.
const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Fallback mime type when a listing entry carries none.
const DEFAULT_MIMETYPE: &str = "application/octet-stream";

/// Canonical description of a stored object or a synthesized directory.
///
/// The API itself only ever returns objects. `Dir` records are fabricated
/// by [`crate::StorageClient::stat`] when a prefix matches several objects,
/// since the backend has no native directory objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileRecord {
    File {
        path: String,
        size: u64,
        mimetype: String,
        /// Unix seconds; 0 when the API reported no usable timestamp.
        timestamp: i64,
    },
    Dir {
        path: String,
    },
}

impl FileRecord {
    pub fn path(&self) -> &str {
        match self {
            FileRecord::File { path, .. } | FileRecord::Dir { path } => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, FileRecord::Dir { .. })
    }
}

/// One raw entry of a `format=json` container listing.
#[derive(Debug, Deserialize)]
pub(crate) struct ListingEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    bytes: u64,
    content_type: Option<String>,
    last_modified: Option<String>,
}

impl From<ListingEntry> for FileRecord {
    fn from(entry: ListingEntry) -> Self {
        let timestamp = entry
            .last_modified
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, LAST_MODIFIED_FORMAT).ok())
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);

        FileRecord::File {
            path: entry.name,
            size: entry.bytes,
            mimetype: entry
                .content_type
                .unwrap_or_else(|| DEFAULT_MIMETYPE.to_string()),
            timestamp,
        }
    }
}
