// Stream spool — the line-delimited JSON handoff between the stream
// listener and the analysis service.
//
// The listener appends one {"text": "..."} object per line; the reader
// drains the file in order, skipping lines that fail to parse. Corrupt
// lines are a logging matter, a missing file is the caller's "no live
// data" case.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One spooled post. Only the text survives the stream; coordinates and
/// timestamps are filled in downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoolEntry {
    pub text: String,
}

/// Read every entry from a spool file, preserving file order.
pub fn read_spool(path: &Path) -> Result<Vec<SpoolEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read spool file {}", path.display()))?;

    let mut entries = Vec::new();
    for (index, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<SpoolEntry>(line) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!(line = index + 1, error = %e, "Skipping corrupt spool line"),
        }
    }

    info!(
        count = entries.len(),
        path = %path.display(),
        "Drained spool file"
    );

    Ok(entries)
}

/// Append one entry to the spool file, creating the file if needed.
pub fn append_entry(path: &Path, entry: &SpoolEntry) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open spool file {}", path.display()))?;

    let line = serde_json::to_string(entry)?;
    writeln!(file, "{line}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_spool(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ember-spool-{name}-{}", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn append_then_read_round_trip() {
        let path = temp_spool("roundtrip");
        append_entry(&path, &SpoolEntry { text: "flood in the valley".to_string() }).unwrap();
        append_entry(&path, &SpoolEntry { text: "all clear now".to_string() }).unwrap();

        let entries = read_spool(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "flood in the valley");
        assert_eq!(entries[1].text, "all clear now");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_lines_are_skipped() {
        let path = temp_spool("corrupt");
        std::fs::write(
            &path,
            "{\"text\": \"first\"}\nnot json at all\n\n{\"text\": \"second\"}\n",
        )
        .unwrap();

        let entries = read_spool(&path).unwrap();
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = temp_spool("missing");
        assert!(read_spool(&path).is_err());
    }
}
