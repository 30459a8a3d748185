//! Record ingestion.
//!
//! Walks a data directory for `*.json` files of the requested kind, parses
//! them into records, and fills a fresh [`RecordStore`] owned by the run.
//! Each file holds an array of records in the serde shape of
//! [`ocean_core::record`]. Files that fail to parse as the requested kind
//! are configuration-class errors: ingestion fails fast, before any oracle
//! call.

use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use ocean_core::{Conversation, Record, RecordKind, RecordStore, SearchHistory};

use crate::errors::Result;

/// Load all records of `kind` from `dir` into a new store.
pub fn load_records(dir: &Path, kind: RecordKind) -> Result<RecordStore> {
    let mut store = RecordStore::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file()
            || entry.path().extension().is_none_or(|ext| ext != "json")
        {
            continue;
        }

        let content = std::fs::read_to_string(entry.path())?;
        let records = parse_file(&content, kind)?;
        debug!(path = ?entry.path(), records = records.len(), "ingested file");
        for record in records {
            store.insert(record);
        }
    }

    info!(%kind, records = store.len(), "ingestion complete");
    Ok(store)
}

/// Parse one file's contents as records of the requested kind.
fn parse_file(content: &str, kind: RecordKind) -> Result<Vec<Record>> {
    let records = match kind {
        RecordKind::Conversations => {
            let conversations: Vec<Conversation> = serde_json::from_str(content)?;
            conversations.into_iter().map(Record::from).collect()
        }
        RecordKind::Searches => {
            let histories: Vec<SearchHistory> = serde_json::from_str(content)?;
            histories.into_iter().map(Record::from).collect()
        }
    };
    Ok(records)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
