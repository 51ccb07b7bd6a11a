//! Streaming row source over delimited text.
//!
//! Reads already-decoded character data one record at a time. The first
//! record is the header row; every later record is yielded as a [`Row`]
//! paired with the shared header list. No RDF logic here.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CsvError, CsvResult};

/// One input record paired with the input's header list.
///
/// A record may carry more cells than there are headers, or fewer. Both
/// [`Row::header`] and [`Row::cell`] return `None` for absent positions,
/// and an empty cell or empty header text also counts as absent.
#[derive(Debug, Clone)]
pub struct Row {
    headers: Arc<[String]>,
    record: csv::StringRecord,
    line: u64,
}

impl Row {
    /// Header name for a cell position, if one exists and is non-empty.
    pub fn header(&self, index: usize) -> Option<&str> {
        self.headers
            .get(index)
            .map(String::as_str)
            .filter(|h| !h.is_empty())
    }

    /// Cell value at a position, `None` when missing or empty.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.record.get(index).filter(|c| !c.is_empty())
    }

    /// Number of cells in this record (may differ from the header count).
    pub fn len(&self) -> usize {
        self.record.len()
    }

    /// True when the record has no cells.
    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    /// 1-based line number of the record in the input.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Iterate `(header, cell)` pairs by position.
    pub fn columns(&self) -> impl Iterator<Item = (Option<&str>, Option<&str>)> {
        (0..self.record.len()).map(|i| (self.header(i), self.cell(i)))
    }
}

/// Lazy, finite, non-restartable sequence of [`Row`]s.
///
/// Line-ending style (LF or CRLF) is handled by the underlying reader, not
/// configured. The optional `max_cell_len` is a resource-exhaustion guard:
/// the first over-long cell fails the sequence, and the iterator yields
/// nothing further after any error.
pub struct RowReader<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    headers: Arc<[String]>,
    max_cell_len: Option<usize>,
    failed: bool,
}

impl<R: Read> RowReader<R> {
    /// Create a row reader over already-decoded text.
    ///
    /// Reads the header record eagerly; an input without one is
    /// [`CsvError::EmptyInput`].
    pub fn new(reader: R, delimiter: u8, max_cell_len: Option<usize>) -> CsvResult<Self> {
        let mut inner = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = inner.headers()?;
        if headers.is_empty() {
            return Err(CsvError::EmptyInput);
        }
        let headers: Arc<[String]> = headers.iter().map(str::to_string).collect();

        Ok(Self {
            records: inner.into_records(),
            headers,
            max_cell_len,
            failed: false,
        })
    }

    /// Header names read from the first record.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl RowReader<File> {
    /// Open a delimited-text file as a row reader.
    pub fn from_path(
        path: impl AsRef<Path>,
        delimiter: u8,
        max_cell_len: Option<usize>,
    ) -> CsvResult<Self> {
        let file = File::open(path)?;
        Self::new(file, delimiter, max_cell_len)
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = CsvResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => {
                self.failed = true;
                return Some(Err(e.into()));
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if let Some(max) = self.max_cell_len {
            for cell in record.iter() {
                let len = cell.chars().count();
                if len > max {
                    self.failed = true;
                    return Some(Err(CsvError::CellTooLong { line, len, max }));
                }
            }
        }

        Some(Ok(Row {
            headers: Arc::clone(&self.headers),
            record,
            line,
        }))
    }
}

/// Detect the charset of raw bytes, normalized to an encoding label.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the named charset.
pub fn decode_content(bytes: &[u8], label: &str) -> CsvResult<String> {
    let encoding = encoding_rs::Encoding::for_label(label.as_bytes())
        .ok_or_else(|| CsvError::Encoding(label.to_string()))?;
    let (decoded, _, _) = encoding.decode(bytes);
    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn rows(csv: &str) -> Vec<Row> {
        RowReader::new(csv.as_bytes(), b',', None)
            .unwrap()
            .collect::<CsvResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_simple_csv() {
        let rows = rows("name,age\nAlice,30\nBob,25");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cell(0), Some("Alice"));
        assert_eq!(rows[0].cell(1), Some("30"));
        assert_eq!(rows[1].cell(0), Some("Bob"));
        assert_eq!(rows[0].header(0), Some("name"));
        assert_eq!(rows[0].header(1), Some("age"));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let reader = RowReader::new("a;b\n1;2".as_bytes(), b';', None).unwrap();
        let rows: Vec<_> = reader.collect::<CsvResult<_>>().unwrap();

        assert_eq!(rows[0].cell(0), Some("1"));
        assert_eq!(rows[0].cell(1), Some("2"));
    }

    #[test]
    fn test_quoted_values() {
        let rows = rows("name,value\n\"Alice\",\"Hello, World\"");

        assert_eq!(rows[0].cell(0), Some("Alice"));
        assert_eq!(rows[0].cell(1), Some("Hello, World"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = rows("a,b\r\n1,2\r\n3,4\r\n");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cell(1), Some("4"));
    }

    #[test]
    fn test_empty_cell_is_absent() {
        let rows = rows("a,b,c\n1,,3");

        assert_eq!(rows[0].cell(0), Some("1"));
        assert_eq!(rows[0].cell(1), None);
        assert_eq!(rows[0].cell(2), Some("3"));
    }

    #[test]
    fn test_more_cells_than_headers() {
        let rows = rows("a,b\n1,2,3,4");

        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0].header(2), None);
        assert_eq!(rows[0].cell(2), Some("3"));
    }

    #[test]
    fn test_fewer_cells_than_headers() {
        let rows = rows("a,b,c\n1,2");

        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].cell(2), None);
        assert_eq!(rows[0].columns().count(), 2);
    }

    #[test]
    fn test_empty_header_is_absent() {
        let rows = rows("a,,c\n1,2,3");

        assert_eq!(rows[0].header(0), Some("a"));
        assert_eq!(rows[0].header(1), None);
        assert_eq!(rows[0].cell(1), Some("2"));
    }

    #[test]
    fn test_duplicate_headers_kept() {
        let reader = RowReader::new("name,name\nAlice,Bob".as_bytes(), b',', None).unwrap();
        assert_eq!(reader.headers(), &["name".to_string(), "name".to_string()]);
    }

    #[test]
    fn test_empty_input_error() {
        let result = RowReader::new("".as_bytes(), b',', None);
        assert!(matches!(result, Err(CsvError::EmptyInput)));
    }

    #[test]
    fn test_line_numbers() {
        let rows = rows("a,b\n1,2\n3,4");

        assert_eq!(rows[0].line(), 2);
        assert_eq!(rows[1].line(), 3);
    }

    #[test]
    fn test_cell_too_long_fails_sequence() {
        let mut reader = RowReader::new("a,b\nok,fine\ntoolong,x".as_bytes(), b',', Some(4)).unwrap();

        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, CsvError::CellTooLong { len: 7, max: 4, .. }));
        // fused after the first error
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_columns_iterator() {
        let rows = rows("a,b\n1,");
        let columns: Vec<_> = rows[0].columns().collect();

        assert_eq!(columns, vec![(Some("a"), Some("1")), (Some("b"), None)]);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name,age\nAlice,30").unwrap();

        let reader = RowReader::from_path(file.path(), b',', None).unwrap();
        let rows: Vec<_> = reader.collect::<CsvResult<_>>().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cell(0), Some("Alice"));
    }

    #[test]
    fn test_detect_encoding_ascii() {
        assert_eq!(detect_encoding(b"name,age\nAlice,30"), "utf-8");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert!(decoded.contains("Soci"));
    }

    #[test]
    fn test_unknown_charset_error() {
        let result = decode_content(b"abc", "not-a-charset");
        assert!(matches!(result, Err(CsvError::Encoding(_))));
    }
}
