use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::GaltonError;
use crate::types::RepoRecord;

/// Read a dataset CSV into memory.
///
/// The file must carry the standard header row; rows deserialize into
/// [`RepoRecord`] in file order. The caller decides what a missing file
/// means, so the existence check happens here and maps to a typed error
/// rather than a raw I/O failure.
///
/// # Errors
///
/// Returns [`GaltonError::FileNotFound`] if `path` does not exist, or
/// [`GaltonError::Csv`] if a row cannot be parsed.
///
/// # Examples
///
/// ```no_run
/// use galton_core::dataset;
/// use std::path::Path;
///
/// let records = dataset::read_csv(Path::new("data/repositories.csv")).unwrap();
/// println!("{} repositories", records.len());
/// ```
pub fn read_csv(path: &Path) -> Result<Vec<RepoRecord>, GaltonError> {
    if !path.exists() {
        return Err(GaltonError::FileNotFound(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Write a dataset to `path` as CSV, creating parent directories as needed.
///
/// Column order is the [`RepoRecord`] field order; writing then reading
/// back yields an equal vector.
///
/// # Errors
///
/// Returns [`GaltonError::Io`] if directories cannot be created, or
/// [`GaltonError::Csv`] on write failure.
pub fn write_csv(path: &Path, records: &[RepoRecord]) -> Result<(), GaltonError> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write any serializable value to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`GaltonError::Serialization`] if the value cannot be encoded,
/// or [`GaltonError::Io`] on write failure.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), GaltonError> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json + "\n")?;
    Ok(())
}

/// Read a JSON document written by [`write_json`] back into a value.
///
/// # Errors
///
/// Returns [`GaltonError::FileNotFound`] if `path` does not exist, or
/// [`GaltonError::Serialization`] if the document does not match `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, GaltonError> {
    if !path.exists() {
        return Err(GaltonError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn ensure_parent(path: &Path) -> Result<(), GaltonError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Language, License};
    use chrono::NaiveDate;

    fn make_record(name: &str, language: Language) -> RepoRecord {
        RepoRecord {
            name: name.into(),
            language,
            stars: 150,
            forks: 20,
            issues_opened: 8,
            issues_closed: 20,
            pull_requests: 6,
            contributors: 3,
            commits: 310,
            size_kb: 512,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            has_wiki: false,
            has_readme: true,
            license: License::Mit,
            category: Category::Libraries,
            age_days: 450,
            days_since_update: 30,
            issue_resolution_rate: 0.714_285_714_285_714_3,
            commits_per_month: 20.666_666_666_666_668,
        }
    }

    #[test]
    fn csv_roundtrip_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repos.csv");
        let records = vec![
            make_record("python-project-001", Language::Python),
            make_record("cpp-project-002", Language::Cpp),
        ];

        write_csv(&path, &records).unwrap();
        let back = read_csv(&path).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn csv_header_uses_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repos.csv");
        write_csv(&path, &[make_record("go-project-001", Language::Go)]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert!(header.starts_with("name,language,stars,forks"));
        assert!(header.ends_with("issue_resolution_rate,commits_per_month"));
    }

    #[test]
    fn missing_file_is_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = read_csv(&path).unwrap_err();
        assert!(matches!(err, GaltonError::FileNotFound(_)));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/repos.csv");
        write_csv(&path, &[make_record("rust-project-001", Language::Rust)]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn json_writes_pretty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/summary.json");
        write_json(&path, &vec![1, 2, 3]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[\n"));
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn json_roundtrip_preserves_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");
        let values = vec![1.5_f64, 2.5, 4.0];

        write_json(&path, &values).unwrap();
        let back: Vec<f64> = read_json(&path).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn read_json_missing_file_is_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json::<Vec<f64>>(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, GaltonError::FileNotFound(_)));
    }

    #[test]
    fn malformed_csv_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "name,language,stars\nx,Python,notanumber\n").unwrap();
        assert!(read_csv(&path).is_err());
    }
}
