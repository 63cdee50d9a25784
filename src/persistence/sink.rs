// * Result Sinks
// * Plain-text writers for deduplication clusters and nearest-neighbour answers

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::corpus::CorpusError;
use crate::engine::pipeline::{DedupReport, QueryOutcome};

/// One line of space-joined ids per cluster, then one line per exact duplicate id
pub fn write_dedup_report<W: Write>(writer: &mut W, report: &DedupReport) -> std::io::Result<()> {
    for cluster in &report.clusters {
        writeln!(writer, "{}", cluster.join(" "))?;
    }
    for duplicate in &report.exact_duplicates {
        writeln!(writer, "{}", duplicate.id)?;
    }
    writer.flush()
}

/// The matched document's normalized text; nothing when there is no match
pub fn write_query_outcome<W: Write>(
    writer: &mut W,
    outcome: &QueryOutcome,
) -> std::io::Result<()> {
    if let QueryOutcome::Match { text, .. } = outcome {
        writeln!(writer, "{}", text)?;
    }
    writer.flush()
}

fn create(path: &Path) -> Result<BufWriter<File>, CorpusError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| CorpusError::Io {
            path: path.display().to_string(),
            source,
        })
}

/// Writes a deduplication report to `path`, replacing any existing file
pub fn save_dedup_report(
    path: impl AsRef<Path>,
    report: &DedupReport,
) -> Result<(), CorpusError> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    write_dedup_report(&mut writer, report)?;
    tracing::info!(
        path = %path.display(),
        clusters = report.clusters.len(),
        "Saved deduplication result"
    );
    Ok(())
}

/// Writes a query answer to `path`, replacing any existing file
pub fn save_query_outcome(
    path: impl AsRef<Path>,
    outcome: &QueryOutcome,
) -> Result<(), CorpusError> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    write_query_outcome(&mut writer, outcome)?;
    tracing::info!(path = %path.display(), matched = outcome.is_match(), "Saved query result");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::exact::ExactDuplicate;

    fn report() -> DedupReport {
        DedupReport {
            clusters: vec![
                vec!["1".to_string(), "4".to_string()],
                vec!["3".to_string()],
            ],
            exact_duplicates: vec![ExactDuplicate {
                id: "2".to_string(),
                original_id: "1".to_string(),
            }],
            similarities: Vec::new(),
            candidate_pairs: 1,
        }
    }

    #[test]
    fn test_dedup_format() {
        let mut out = Vec::new();
        write_dedup_report(&mut out, &report()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 4\n3\n2\n");
    }

    #[test]
    fn test_query_match_writes_text() {
        let outcome = QueryOutcome::Match {
            id: "7".to_string(),
            text: "the cat sat".to_string(),
            similarity: 1.0,
            cluster_size: 1,
        };
        let mut out = Vec::new();
        write_query_outcome(&mut out, &outcome).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "the cat sat\n");
    }

    #[test]
    fn test_query_no_match_writes_nothing() {
        let mut out = Vec::new();
        write_query_outcome(&mut out, &QueryOutcome::NoMatch).unwrap();
        assert!(out.is_empty());
    }
}
