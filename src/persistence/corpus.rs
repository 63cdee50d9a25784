// * Corpus Reader
// * Headerless tab-separated input: `id<TAB>text` or bare `text` rows, malformed rows counted and skipped

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),
}

/// One input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Row accounting for one corpus read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_rows: usize,
    pub documents: usize,
    pub malformed: usize,
}

/// Parses a single trimmed row; `parsed_so_far` drives id auto-assignment
fn parse_row(line: &str, parsed_so_far: usize) -> Option<Document> {
    let fields: Vec<&str> = line.trim().split('\t').collect();

    match fields.as_slice() {
        [id, text] if !id.trim().is_empty() && !text.trim().is_empty() => {
            Some(Document::new(id.trim(), text.trim()))
        }
        [text] if !text.trim().is_empty() => {
            Some(Document::new((parsed_so_far + 1).to_string(), text.trim()))
        }
        _ => None,
    }
}

/// Reads documents from any buffered source
pub fn parse_corpus<R: BufRead>(reader: R) -> Result<(Vec<Document>, CorpusStats), CorpusError> {
    let mut documents = Vec::new();
    let mut stats = CorpusStats::default();

    for line in reader.lines() {
        let line = line?;
        stats.total_rows += 1;

        match parse_row(&line, documents.len()) {
            Some(doc) => documents.push(doc),
            None => stats.malformed += 1,
        }
    }

    stats.documents = documents.len();
    info!(
        total_rows = stats.total_rows,
        documents = stats.documents,
        malformed = stats.malformed,
        "Corpus parsed"
    );

    Ok((documents, stats))
}

/// Reads a corpus file from disk
pub fn read_corpus(path: impl AsRef<Path>) -> Result<(Vec<Document>, CorpusStats), CorpusError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CorpusError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_corpus(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_two_field_rows() {
        let input = "a\tfirst text\nb\tsecond text\n";
        let (docs, stats) = parse_corpus(Cursor::new(input)).unwrap();
        assert_eq!(
            docs,
            vec![Document::new("a", "first text"), Document::new("b", "second text")]
        );
        assert_eq!(stats.malformed, 0);
        assert_eq!(stats.total_rows, 2);
    }

    #[test]
    fn test_single_field_gets_running_id() {
        let input = "x\tkeyed\nbare text\nmore bare text\n";
        let (docs, _) = parse_corpus(Cursor::new(input)).unwrap();
        assert_eq!(docs[1].id, "2");
        assert_eq!(docs[2].id, "3");
    }

    #[test]
    fn test_running_id_skips_malformed_rows() {
        let input = "\nbare text\n";
        let (docs, stats) = parse_corpus(Cursor::new(input)).unwrap();
        assert_eq!(docs, vec![Document::new("1", "bare text")]);
        assert_eq!(stats.malformed, 1);
    }

    #[test]
    fn test_malformed_rows_counted() {
        let input = "a\tb\tc\n\n   \nid\t \nok\tfine\n";
        let (docs, stats) = parse_corpus(Cursor::new(input)).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(stats.malformed, 3);
        assert_eq!(stats.total_rows, 5);
        assert_eq!(stats.documents, 2);
    }

    #[test]
    fn test_blank_second_field_is_trimmed_to_single_field() {
        // * "id\t " trims to "id", one non-empty field
        let (docs, stats) = parse_corpus(Cursor::new("id\t \n")).unwrap();
        assert_eq!(docs, vec![Document::new("1", "id")]);
        assert_eq!(stats.malformed, 0);
    }

    #[test]
    fn test_trailing_tab_is_trimmed() {
        let (docs, _) = parse_corpus(Cursor::new("just text\t\n")).unwrap();
        assert_eq!(docs, vec![Document::new("1", "just text")]);
    }

    #[test]
    fn test_missing_file() {
        let err = read_corpus("/definitely/not/here.tsv").unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }
}
