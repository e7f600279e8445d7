use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::Path;

use super::types::{Dataset, GrantRecord};

/// Load and validate the grant dataset.
///
/// The whole file either loads or it doesn't: a single malformed row is a
/// fatal error, never a partial load. The returned `Dataset` is the one
/// cached copy for the process lifetime; nothing re-reads the file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open dataset: {}", path.display()))?;

    let mut records: Vec<GrantRecord> = Vec::new();
    for (idx, row) in reader.deserialize::<GrantRecord>().enumerate() {
        // idx is zero-based and the header occupies line 1
        let record =
            row.with_context(|| format!("malformed row at line {} of {}", idx + 2, path.display()))?;
        records.push(record);
    }

    validate(&records)?;

    tracing::info!(rows = records.len(), path = %path.display(), "dataset loaded");

    Ok(Dataset {
        records,
        source: path.to_path_buf(),
        loaded_at: chrono::Local::now(),
    })
}

/// Cross-row invariants the CSV schema cannot express.
fn validate(records: &[GrantRecord]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.grant_id.as_str()) {
            bail!("duplicate grant_id {:?}", record.grant_id);
        }
        if record.reinstated && !record.terminated {
            bail!(
                "grant {:?} is marked reinstated but not terminated",
                record.grant_id
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const HEADER: &str =
        "grant_id,org_name,org_state,budget_preferred,terminated,reinstated,has_flagged_words,in_cruz_list\n";

    #[test]
    fn test_loads_python_style_booleans() {
        let csv = format!(
            "{}g1,MIT,MA,100.50,True,False,True,False\ng2,Stanford,CA,0.0,true,false,0,1\n",
            HEADER
        );
        let file = write_csv(&csv);
        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.records.len(), 2);
        assert!(dataset.records[0].terminated);
        assert!(dataset.records[0].has_flagged_words);
        assert!(!dataset.records[1].has_flagged_words);
        assert!(dataset.records[1].in_cruz_list);
    }

    #[test]
    fn test_dollars_rounded_to_cents() {
        let csv = format!("{}g1,MIT,MA,99.499,True,False,True,False\n", HEADER);
        let file = write_csv(&csv);
        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.records[0].budget_cents, 9950);
    }

    #[test]
    fn test_missing_state_is_none() {
        let csv = format!("{}g1,Remote College,,20.0,True,False,False,False\n", HEADER);
        let file = write_csv(&csv);
        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.records[0].org_state, None);
    }

    #[test]
    fn test_malformed_budget_fails_whole_load() {
        let csv = format!(
            "{}g1,MIT,MA,100.0,True,False,True,False\ng2,Stanford,CA,not-a-number,True,False,False,False\n",
            HEADER
        );
        let file = write_csv(&csv);
        let err = load_dataset(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "error was: {err:#}");
    }

    #[test]
    fn test_negative_budget_rejected() {
        let csv = format!("{}g1,MIT,MA,-1.0,True,False,True,False\n", HEADER);
        let file = write_csv(&csv);
        assert!(load_dataset(file.path()).is_err());
    }

    #[test]
    fn test_duplicate_grant_id_rejected() {
        let csv = format!(
            "{}g1,MIT,MA,100.0,True,False,True,False\ng1,Stanford,CA,50.0,True,False,False,False\n",
            HEADER
        );
        let file = write_csv(&csv);
        let err = load_dataset(file.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate grant_id"));
    }

    #[test]
    fn test_reinstated_without_terminated_rejected() {
        let csv = format!("{}g1,MIT,MA,100.0,False,True,True,False\n", HEADER);
        let file = write_csv(&csv);
        let err = load_dataset(file.path()).unwrap_err();
        assert!(err.to_string().contains("reinstated"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_dataset(Path::new("no-such-dataset.csv")).unwrap_err();
        assert!(err.to_string().contains("no-such-dataset.csv"));
    }
}
