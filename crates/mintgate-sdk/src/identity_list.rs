//! Identity list files.
//!
//! Two formats are accepted:
//!
//! - text: one hex identity per line, `0x` optional. Blank lines and lines
//!   starting with `#` are skipped.
//! - JSON (`.json` extension): an array of hex strings, or an array of
//!   one-element string arrays as produced by `StandardMerkleTree` tooling.
//!
//! Errors carry the 1-based line or entry number.

use std::path::Path;

use eyre::Context as _;
use mintgate_core::base::{Identity, ParseError};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Errors produced when parsing an identity list.
#[derive(Error, Debug)]
pub enum IdentityListError {
    /// A text line is not a valid identity.
    #[error("Invalid identity on line {line}: {source}")]
    InvalidLine {
        /// 1-based line number.
        line: usize,
        /// Parse failure.
        source: ParseError,
    },

    /// A JSON entry is not a valid identity.
    #[error("Invalid identity in entry {entry}: {source}")]
    InvalidEntry {
        /// 1-based entry number.
        entry: usize,
        /// Parse failure.
        source: ParseError,
    },

    /// A JSON entry is neither a string nor a one-element string array.
    #[error("Entry {entry} must be a hex string or a one-element array of hex strings")]
    UnexpectedShape {
        /// 1-based entry number.
        entry: usize,
    },

    /// The document is not a JSON array.
    #[error("Invalid JSON identity list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Identity list file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityListFormat {
    /// One identity per line.
    Text,
    /// JSON array.
    Json,
}

impl IdentityListFormat {
    /// Pick the format from a file extension; anything but `.json` is text.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json { Self::Json } else { Self::Text }
    }
}

/// Parse identities from file contents, preserving input order.
///
/// # Errors
/// Returns an [`IdentityListError`] naming the first offending line or entry.
pub fn parse_identity_list(
    contents: &str,
    format: IdentityListFormat,
) -> Result<Vec<Identity>, IdentityListError> {
    match format {
        IdentityListFormat::Text => parse_text(contents),
        IdentityListFormat::Json => parse_json(contents),
    }
}

fn parse_text(contents: &str) -> Result<Vec<Identity>, IdentityListError> {
    contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index.saturating_add(1), line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, value)| {
            value
                .parse::<Identity>()
                .map_err(|source| IdentityListError::InvalidLine { line, source })
        })
        .collect()
}

fn parse_json(contents: &str) -> Result<Vec<Identity>, IdentityListError> {
    let entries: Vec<Value> = serde_json::from_str(contents)?;
    entries
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let entry = index.saturating_add(1);
            let raw = match value {
                Value::String(s) => s.as_str(),
                Value::Array(values) => match values.as_slice() {
                    [Value::String(s)] => s.as_str(),
                    _ => return Err(IdentityListError::UnexpectedShape { entry }),
                },
                Value::Null | Value::Bool(_) | Value::Number(_) | Value::Object(_) => {
                    return Err(IdentityListError::UnexpectedShape { entry });
                }
            };
            raw.parse::<Identity>()
                .map_err(|source| IdentityListError::InvalidEntry { entry, source })
        })
        .collect()
}

/// Read and parse an identity list file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub async fn read_identity_list(path: &Path) -> eyre::Result<Vec<Identity>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read identity list {}", path.display()))?;
    let format = IdentityListFormat::from_path(path);
    let identities = parse_identity_list(&contents, format)
        .with_context(|| format!("Failed to parse identity list {}", path.display()))?;
    info!(file = ?path, count = identities.len(), "Loaded identities");
    Ok(identities)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const A: &str = "0x1111111111111111111111111111111111111111";
    const B: &str = "2222222222222222222222222222222222222222";

    #[test]
    fn text_skips_blank_and_comment_lines() {
        let contents = format!("# allowlist\n{A}\n\n   {B}  \n# end\n");
        let identities =
            parse_identity_list(&contents, IdentityListFormat::Text).expect("list should parse");
        assert_eq!(
            identities,
            vec![Identity::new([0x11; 20]), Identity::new([0x22; 20])]
        );
    }

    #[test]
    fn text_reports_line_number() {
        let contents = format!("{A}\n\n0x1234\n");
        let err = parse_identity_list(&contents, IdentityListFormat::Text)
            .expect_err("short identity must fail");
        assert!(matches!(err, IdentityListError::InvalidLine { line: 3, .. }));
    }

    #[test]
    fn json_accepts_both_shapes() {
        let contents = format!(r#"["{A}", ["{B}"]]"#);
        let identities =
            parse_identity_list(&contents, IdentityListFormat::Json).expect("list should parse");
        assert_eq!(
            identities,
            vec![Identity::new([0x11; 20]), Identity::new([0x22; 20])]
        );
    }

    #[test]
    fn json_reports_entry_number() {
        let contents = format!(r#"["{A}", ["{B}", "{A}"], 7]"#);
        let err = parse_identity_list(&contents, IdentityListFormat::Json)
            .expect_err("two-element entry must fail");
        assert!(matches!(err, IdentityListError::UnexpectedShape { entry: 2 }));

        let contents = format!(r#"["{A}", "0xnothex"]"#);
        let err = parse_identity_list(&contents, IdentityListFormat::Json)
            .expect_err("bad hex must fail");
        assert!(matches!(err, IdentityListError::InvalidEntry { entry: 2, .. }));
    }

    #[test]
    fn json_must_be_an_array() {
        let err = parse_identity_list(r#"{"values": []}"#, IdentityListFormat::Json)
            .expect_err("object must fail");
        assert!(matches!(err, IdentityListError::Json(_)));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            IdentityListFormat::from_path(&PathBuf::from("list.JSON")),
            IdentityListFormat::Json
        );
        assert_eq!(
            IdentityListFormat::from_path(&PathBuf::from("list.txt")),
            IdentityListFormat::Text
        );
        assert_eq!(
            IdentityListFormat::from_path(&PathBuf::from("list")),
            IdentityListFormat::Text
        );
    }

    #[tokio::test]
    async fn reads_from_disk() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("identities.txt");
        tokio::fs::write(&path, format!("{A}\n{B}\n"))
            .await
            .expect("Failed to write identities");
        let identities = read_identity_list(&path).await.expect("list should load");
        assert_eq!(identities.len(), 2);
    }
}
