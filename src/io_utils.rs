//! CSV input plumbing shared by every subcommand.
//!
//! Covers delimiter resolution (extension-based auto-detection with manual
//! override), input decoding via `encoding_rs` with a UTF-8 default, and
//! reader construction. Readers are non-flexible: a row with the wrong
//! field count is a read error, not a short row.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        Some(value) => Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'")),
        None => Ok(UTF_8),
    }
}

pub fn resolve_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn csv_reader(file: File, delimiter: u8) -> csv::Reader<BufReader<File>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false)
        .from_reader(BufReader::new(file))
}

pub fn decode_field(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_field(field, encoding))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_delimiter_prefers_explicit_value() {
        assert_eq!(resolve_delimiter(Path::new("data.tsv"), Some(b';')), b';');
    }

    #[test]
    fn resolve_delimiter_detects_tsv_extension() {
        assert_eq!(resolve_delimiter(Path::new("data.TSV"), None), b'\t');
        assert_eq!(resolve_delimiter(Path::new("data.csv"), None), b',');
        assert_eq!(resolve_delimiter(Path::new("data"), None), b',');
    }

    #[test]
    fn resolve_encoding_defaults_to_utf8() {
        assert_eq!(resolve_encoding(None).unwrap(), UTF_8);
        assert_eq!(
            resolve_encoding(Some("latin1")).unwrap(),
            encoding_rs::WINDOWS_1252
        );
        assert!(resolve_encoding(Some("not-an-encoding")).is_err());
    }
}
