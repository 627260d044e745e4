use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::computing::Vector;
use crate::error_handling::*;
use crate::storing::VectorTable;

pub struct LoadReport {
    pub loaded: usize,
    pub warnings: Vec<CalcError>,
    pub truncated: bool,
}

/// Parses `<name>,<x>,<y>,<z>`, tolerating whitespace around every field.
pub fn parse_record(line: &str) -> Option<Vector> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [name, x, y, z] = fields.as_slice() else {
        return None;
    };

    let mut chars = name.chars();
    let name = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => c,
        _ => return None,
    };

    Some(Vector::new(name, x.parse().ok()?, y.parse().ok()?, z.parse().ok()?))
}

pub fn format_record(vector: &Vector) -> String {
    format!("{},{:.2},{:.2},{:.2}", vector.name, vector.x, vector.y, vector.z)
}

/// Replaces the table's contents with the vectors stored at `path`.
///
/// The file is read in full before the table is touched; on any error the
/// table keeps its previous contents.
pub fn load(path: &Path, table: &mut VectorTable) -> Result<LoadReport> {
    let mut file = File::open(path).map_err(|source| CalcError::file_unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|source| CalcError::read_failed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut staged = VectorTable::new(table.capacity());
    let mut report = LoadReport{loaded: 0, warnings: Vec::new(), truncated: false};

    for (index, raw) in bytes.split(|byte| *byte == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let record = match std::str::from_utf8(raw) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => parse_record(line),
            Err(_) => None,
        };
        let Some(record) = record else {
            tracing::warn!(line = index + 1, "skipping malformed record");
            let content = String::from_utf8_lossy(raw).into_owned();
            report.warnings.push(CalcError::malformed_record {line: index + 1, content});
            continue;
        };

        match staged.create_or_get(record.name) {
            Ok(slot) => *slot = record,
            Err(_) => {
                tracing::warn!(line = index + 1, "capacity reached, ignoring the rest of the file");
                report.truncated = true;
                break;
            },
        }
    }

    report.loaded = staged.len();
    *table = staged;
    tracing::info!(path = %path.display(), loaded = report.loaded, "loaded vectors");
    Ok(report)
}

pub fn save(path: &Path, table: &VectorTable) -> Result<usize> {
    let unwritable = |source| CalcError::file_unwritable {path: path.to_path_buf(), source};

    let mut writer = BufWriter::new(File::create(path).map_err(unwritable)?);
    for vector in table.list() {
        writeln!(writer, "{}", format_record(vector)).map_err(unwritable)?;
    }
    writer.flush().map_err(unwritable)?;

    tracing::info!(path = %path.display(), saved = table.len(), "saved vectors");
    Ok(table.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_table() -> VectorTable {
        let mut table = VectorTable::default();
        *table.create_or_get('a').unwrap() = Vector::new('a', 1.0, 2.0, 3.0);
        *table.create_or_get('b').unwrap() = Vector::new('b', -4.126, 0.5, 6.0);
        table
    }

    #[test]
    fn record_parsing_accepts_padding() {
        let vector = parse_record(" a , 1.5, -2 ,3").unwrap();
        assert_eq!(vector, Vector::new('a', 1.5, -2.0, 3.0));
    }

    #[test]
    fn record_parsing_rejects_bad_shapes() {
        assert!(parse_record("a,1,2").is_none());
        assert!(parse_record("a,1,2,3,4").is_none());
        assert!(parse_record("ab,1,2,3").is_none());
        assert!(parse_record("7,1,2,3").is_none());
        assert!(parse_record("a,one,2,3").is_none());
        assert!(parse_record(",1,2,3").is_none());
    }

    #[test]
    fn save_writes_two_decimals_in_table_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.csv");
        assert_eq!(save(&path, &sample_table()).unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,1.00,2.00,3.00\nb,-4.13,0.50,6.00\n");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.csv");
        let saved = sample_table();
        save(&path, &saved).unwrap();

        let mut restored = VectorTable::default();
        let report = load(&path, &mut restored).unwrap();
        assert_eq!(report.loaded, 2);
        assert!(report.warnings.is_empty());
        for vector in saved.list() {
            let copy = restored.find(vector.name).unwrap();
            for (l, r) in vector.components().iter().zip(copy.components()) {
                assert!((l - r).abs() <= 0.005 + 1e-9);
            }
        }
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.csv");
        fs::write(&path, "a,1,2,3\nnot a vector\nb,4,5,6\n").unwrap();

        let mut table = VectorTable::default();
        let report = load(&path, &mut table).unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(report.warnings[0], CalcError::malformed_record {line: 2, ..}));
    }

    #[test]
    fn load_replaces_existing_vectors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.csv");
        fs::write(&path, "z,0,0,1\n").unwrap();

        let mut table = sample_table();
        load(&path, &mut table).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.find('a').is_none());
    }

    #[test]
    fn missing_file_leaves_table_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = sample_table();
        let result = load(&dir.path().join("absent.csv"), &mut table);
        assert!(matches!(result, Err(CalcError::file_unreadable {..})));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn undecodable_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.csv");
        fs::write(&path, b"a,1,2,3\n\xff\xfe,1,1,1\r\nb,4,5,6\n").unwrap();

        let mut table = VectorTable::default();
        let report = load(&path, &mut table).unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(report.warnings[0], CalcError::malformed_record {line: 2, ..}));
        assert_eq!(table.find('b').unwrap().components(), [4.0, 5.0, 6.0]);
    }

    #[test]
    fn unreadable_path_leaves_table_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = sample_table();
        let result = load(dir.path(), &mut table);
        assert!(result.is_err());
        assert_eq!(table.len(), 2);
        assert_eq!(table.find('a').unwrap().components(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn crlf_and_blank_lines_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.csv");
        fs::write(&path, "a,1,2,3\r\n\r\n   \nb,4,5,6").unwrap();

        let mut table = VectorTable::default();
        let report = load(&path, &mut table).unwrap();
        assert_eq!(report.loaded, 2);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn load_stops_at_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.csv");
        fs::write(&path, "a,1,1,1\nb,2,2,2\nc,3,3,3\n").unwrap();

        let mut table = VectorTable::new(2);
        let report = load(&path, &mut table).unwrap();
        assert_eq!(report.loaded, 2);
        assert!(report.truncated);
        assert!(table.find('c').is_none());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.csv");
        assert!(matches!(save(&path, &sample_table()), Err(CalcError::file_unwritable {..})));
    }
}
