use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::model::warnings::WarningRecord;

/// In-memory shape of the ledger: user id -> chronological warning history.
pub type LedgerMap = BTreeMap<u64, Vec<WarningRecord>>;

/// Read the ledger file. A missing file yields an empty ledger.
pub fn read_ledger_file(path: &Path) -> anyhow::Result<LedgerMap> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            return Ok(LedgerMap::new());
        }
        Err(source) => {
            return Err(source)
                .with_context(|| format!("failed to read warnings file {}", path.display()));
        }
    };

    parse_ledger(&raw)
}

/// Overwrite the ledger file with a full snapshot.
///
/// The snapshot is written to a sibling temp file and renamed over the
/// target, so the file on disk is always one complete snapshot — either the
/// old contents or the new, never a truncated mix.
pub fn write_ledger_file(path: &Path, map: &LedgerMap) -> anyhow::Result<()> {
    let rendered = render_ledger(map)?;

    let tmp_path = sibling_tmp_path(path);
    fs::write(&tmp_path, rendered)
        .with_context(|| format!("failed to write temp warnings file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to move warnings file into place at {}", path.display()))?;

    Ok(())
}

fn sibling_tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Parse the on-disk JSON object: string-encoded user ids mapped to arrays
/// of `{timestamp, reason}` records.
///
/// Empty arrays are dropped so a hand-edited file cannot violate the
/// zero-warnings-means-absent invariant.
fn parse_ledger(raw: &str) -> anyhow::Result<LedgerMap> {
    let keyed: BTreeMap<String, Vec<WarningRecord>> =
        serde_json::from_str(raw).context("warnings file is not valid JSON")?;

    let mut map = LedgerMap::new();
    for (key, records) in keyed {
        let user_id = key
            .parse::<u64>()
            .with_context(|| format!("invalid user id key `{key}` in warnings file"))?;

        if records.is_empty() {
            continue;
        }

        map.insert(user_id, records);
    }

    Ok(map)
}

/// Serialize with string user-id keys, pretty-printed with 4-space indents.
fn render_ledger(map: &LedgerMap) -> anyhow::Result<String> {
    let keyed: BTreeMap<String, &Vec<WarningRecord>> = map
        .iter()
        .map(|(user_id, records)| (user_id.to_string(), records))
        .collect();

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    keyed
        .serialize(&mut serializer)
        .context("failed to serialize warnings")?;

    String::from_utf8(buf).context("serialized warnings are not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::{LedgerMap, parse_ledger, read_ledger_file, render_ledger, write_ledger_file};
    use crate::model::warnings::WarningRecord;

    fn record(timestamp: u64, reason: &str) -> WarningRecord {
        WarningRecord {
            timestamp,
            reason: reason.to_owned(),
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let map = read_ledger_file(&dir.path().join("warnings.json")).expect("read");
        assert!(map.is_empty());
    }

    #[test]
    fn written_file_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("warnings.json");

        let mut map = LedgerMap::new();
        map.insert(42, vec![record(1_700_000_000, "spam"), record(1_700_000_100, "more spam")]);
        map.insert(7, vec![record(1_700_000_050, "rudeness")]);

        write_ledger_file(&path, &map).expect("write");
        let reloaded = read_ledger_file(&path).expect("read");

        assert_eq!(reloaded, map);
    }

    #[test]
    fn on_disk_shape_uses_string_keys_and_four_space_indent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("warnings.json");

        let mut map = LedgerMap::new();
        map.insert(42, vec![record(1_700_000_000, "spam")]);
        write_ledger_file(&path, &map).expect("write");

        let raw = std::fs::read_to_string(&path).expect("read raw");
        assert!(raw.contains("\"42\""));
        assert!(raw.contains("\n    \"42\""));
        assert!(raw.contains("\"timestamp\""));
        assert!(raw.contains("\"reason\""));

        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["42"][0]["timestamp"], 1_700_000_000_u64);
        assert_eq!(value["42"][0]["reason"], "spam");
    }

    #[test]
    fn parse_drops_empty_histories() {
        let map = parse_ledger(r#"{"42": [], "7": [{"timestamp": 5, "reason": "x"}]}"#)
            .expect("parse");
        assert!(!map.contains_key(&42));
        assert_eq!(map[&7], vec![record(5, "x")]);
    }

    #[test]
    fn parse_rejects_non_numeric_keys() {
        assert!(parse_ledger(r#"{"not-a-user": []}"#).is_err());
    }

    #[test]
    fn render_emits_no_entry_for_absent_users() {
        let mut map = LedgerMap::new();
        map.insert(42, vec![record(1, "spam")]);

        let raw = render_ledger(&map).expect("render");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("42"));
    }

    #[test]
    fn rewrite_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("warnings.json");

        let mut map = LedgerMap::new();
        map.insert(1, vec![record(10, "first")]);
        write_ledger_file(&path, &map).expect("first write");

        map.insert(2, vec![record(20, "second")]);
        write_ledger_file(&path, &map).expect("second write");

        let reloaded = read_ledger_file(&path).expect("read");
        assert_eq!(reloaded, map);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
