use crate::error::{CopyError, Result};

/// Scans a newline-delimited push response for error records.
///
/// Lines that are not JSON are skipped; the first record with an `error`
/// field fails the whole push.
pub fn process_push_logs(logs: &str) -> Result<()> {
    for line in logs.split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        let Ok(record) = serde_json::from_str::<serde_json::Value>(line) else {
            continue;
        };
        if record.get("error").is_some() {
            return Err(CopyError::RegistryPush { record });
        }
    }
    Ok(())
}
