use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use anyhow::Context;
use encoding_rs::Encoding;
use serde::Deserialize;

use super::error::{DataError, Result};
use super::model::{RawTable, ReadingDataset};
use super::reshape::build_dataset;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// TextEncoding – the declared encoding of an upload
// ---------------------------------------------------------------------------

/// Character encoding the uploaded bytes are declared to use.
///
/// There is no default: the caller always states which encoding applies and
/// bytes that are invalid under it are rejected rather than replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    pub fn utf_8() -> Self {
        TextEncoding(encoding_rs::UTF_8)
    }

    /// Korean legacy two-byte encoding (decodes the CP949 superset).
    pub fn euc_kr() -> Self {
        TextEncoding(encoding_rs::EUC_KR)
    }

    /// Latin-1 as browsers treat it, i.e. windows-1252.
    pub fn latin_1() -> Self {
        TextEncoding(encoding_rs::WINDOWS_1252)
    }

    /// Encodings offered in the UI selector.
    pub fn choices() -> [Self; 3] {
        [Self::utf_8(), Self::euc_kr(), Self::latin_1()]
    }

    /// Resolve a WHATWG label such as `utf-8`, `euc-kr`, `cp949` or `latin1`.
    pub fn for_label(label: &str) -> Option<Self> {
        let label = label.trim();
        // Windows code page name, not a WHATWG label
        let label = if label.eq_ignore_ascii_case("cp949") {
            "windows-949"
        } else {
            label
        };
        Encoding::for_label(label.as_bytes()).map(TextEncoding)
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.0
    }

    /// Decode `bytes` strictly. A UTF-8 byte-order mark is skipped.
    pub fn decode<'b>(&self, bytes: &'b [u8]) -> Result<Cow<'b, str>> {
        let bytes = if self.0 == encoding_rs::UTF_8 {
            bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
        } else {
            bytes
        };
        self.0
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or(DataError::Undecodable {
                encoding: self.0.name(),
            })
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = String;

    fn try_from(label: String) -> std::result::Result<Self, Self::Error> {
        label.parse()
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = String;

    fn from_str(label: &str) -> std::result::Result<Self, Self::Err> {
        TextEncoding::for_label(label).ok_or_else(|| format!("unknown text encoding '{label}'"))
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse CSV bytes declared to be in `encoding` into a [`RawTable`].
///
/// Layout: header row first, then data rows.  Column 0 becomes `category`,
/// column 1 becomes `age_group`; remaining columns keep their labels.
pub fn load(bytes: &[u8], encoding: TextEncoding) -> Result<RawTable> {
    let text = encoding.decode(bytes)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    log::debug!(
        "Parsed {} rows x {} columns as {encoding}",
        rows.len(),
        headers.len()
    );
    RawTable::from_records(headers, rows)
}

/// Read a CSV file from disk and parse it with [`load`].
pub fn load_file(path: &Path, encoding: TextEncoding) -> anyhow::Result<RawTable> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let table = load(&bytes, encoding)
        .with_context(|| format!("parsing {} as {encoding} CSV", path.display()))?;
    Ok(table)
}

/// Read, parse and reshape a survey file in one step.
pub fn load_dataset_file(path: &Path, encoding: TextEncoding) -> anyhow::Result<ReadingDataset> {
    let table = load_file(path, encoding)?;
    let dataset =
        build_dataset(&table).with_context(|| format!("reshaping {}", path.display()))?;
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::ErrorKind;

    const SAMPLE: &str = "구분1,연령대,2022,2023\n연령,10대,5.0,-\n연령,20대,3.2,4.1\n";

    #[test]
    fn test_load_utf8_renames_leading_columns() {
        let table = load(SAMPLE.as_bytes(), TextEncoding::utf_8()).unwrap();
        assert_eq!(table.headers(), &["category", "age_group", "2022", "2023"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_strips_utf8_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"a,b,2022\nx,y,1\n");
        let table = load(&bytes, TextEncoding::utf_8()).unwrap();
        assert_eq!(table.value_columns(), &["2022"]);
    }

    #[test]
    fn test_load_euc_kr() {
        let (bytes, _, had_errors) = encoding_rs::EUC_KR.encode(SAMPLE);
        assert!(!had_errors);

        let table = load(&bytes, TextEncoding::euc_kr()).unwrap();
        let first = table.rows().next().unwrap();
        assert_eq!(first.category(), Some("연령"));
        assert_eq!(first.age_group(), Some("10대"));
    }

    #[test]
    fn test_euc_kr_bytes_rejected_as_utf8() {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode(SAMPLE);
        let err = load(&bytes, TextEncoding::utf_8()).unwrap_err();
        assert!(matches!(err, DataError::Undecodable { encoding: "UTF-8" }));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_latin1_accepts_any_bytes() {
        let table = load(b"a,b,\xe9t\xe9\nx,y,1\n", TextEncoding::latin_1()).unwrap();
        assert_eq!(table.value_columns(), &["été"]);
    }

    #[test]
    fn test_empty_input_is_format_error() {
        let err = load(b"", TextEncoding::utf_8()).unwrap_err();
        assert!(matches!(err, DataError::TooFewColumns { found: 0 }));
    }

    #[test]
    fn test_single_column_is_format_error() {
        let err = load(b"only\n1\n", TextEncoding::utf_8()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!(TextEncoding::for_label("cp949"), Some(TextEncoding::euc_kr()));
        assert_eq!(TextEncoding::for_label(" UTF8 "), Some(TextEncoding::utf_8()));
        assert_eq!(TextEncoding::for_label("latin1"), Some(TextEncoding::latin_1()));
        assert!("klingon".parse::<TextEncoding>().is_err());
    }
}
