//! Delimited sample file reader.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::Samples;
use crate::error::{ExplorerError, Result};

/// Reads two numeric columns from a delimited text file.
#[derive(Debug, Clone, Copy)]
pub struct SampleReader {
    delimiter: u8,
}

impl Default for SampleReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl SampleReader {
    /// Reader splitting fields on `delimiter`.
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read a sample file.
    ///
    /// The first two columns of every record are the x and y coordinates;
    /// extra columns are ignored. Lines starting with `#` are comments. A
    /// leading row that does not parse as numbers is taken as a header.
    pub fn read_file(&self, path: &Path) -> Result<Samples> {
        let file = File::open(path)
            .map_err(|e| ExplorerError::sample_read(path, e.to_string()))?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut x = Vec::new();
        let mut y = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            match parse_pair(&record) {
                Some([xi, yi]) => {
                    x.push(xi);
                    y.push(yi);
                },
                None if index == 0 => {
                    tracing::debug!(header = ?record, "skipping header row");
                },
                None => {
                    let line = record.position().map_or(index + 1, |p| p.line() as usize);
                    return Err(ExplorerError::sample_read(
                        path,
                        format!("line {}: expected two numbers, got {:?}", line, record),
                    ));
                },
            }
        }

        if x.is_empty() {
            return Err(ExplorerError::sample_read(path, "no samples found"));
        }
        tracing::info!(path = %path.display(), samples = x.len(), "read samples");
        Samples::new(x, y)
    }
}

fn parse_pair(record: &csv::StringRecord) -> Option<[f64; 2]> {
    let x = record.get(0)?.parse().ok()?;
    let y = record.get(1)?.parse().ok()?;
    Some([x, y])
}

/// Read a sample file with the given field delimiter.
pub fn read_samples(path: &Path, delimiter: u8) -> Result<Samples> {
    SampleReader::new(delimiter).read_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_two_columns_with_header_and_comments() {
        let file = write_file("x,y\n# comment\n0, 1\n2.5,3,extra\n\n-1e-1,4\n");
        let samples = read_samples(file.path(), b',').unwrap();
        assert_eq!(samples.x, vec![0.0, 2.5, -0.1]);
        assert_eq!(samples.y, vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_custom_delimiter() {
        let file = write_file("1\t2\n3\t4\n");
        let samples = read_samples(file.path(), b'\t').unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.y, vec![2.0, 4.0]);
    }

    #[test]
    fn test_non_numeric_row_after_data_is_an_error() {
        let file = write_file("1,2\nfoo,bar\n");
        let err = read_samples(file.path(), b',').unwrap_err();
        assert!(matches!(err, ExplorerError::SampleRead { .. }));
        assert!(err.to_string().contains("expected two numbers"));
    }

    #[test]
    fn test_empty_and_missing_files() {
        let file = write_file("x,y\n");
        assert!(read_samples(file.path(), b',').is_err());
        assert!(read_samples(Path::new("/definitely/not/here.csv"), b',').is_err());
    }
}
