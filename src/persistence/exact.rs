// * Exact-Duplicate Pre-Filter
// * Byte-identical raw text only; runs before normalization

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use xxhash_rust::xxh64::xxh64;

use super::corpus::Document;

/// A removed document and the first-seen document it repeats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactDuplicate {
    pub id: String,
    pub original_id: String,
}

/// Unique documents in first-seen order plus the removed repeats
#[derive(Debug, Clone, Default)]
pub struct ExactDedupOutcome {
    pub unique: Vec<Document>,
    pub duplicates: Vec<ExactDuplicate>,
}

/// Keeps the first document for each distinct raw text
pub fn remove_exact_duplicates(documents: Vec<Document>) -> ExactDedupOutcome {
    // * Content hash -> indices into `unique`; texts are compared on hash hit
    let mut seen: HashMap<u64, Vec<usize>> = HashMap::new();
    let mut outcome = ExactDedupOutcome::default();

    for doc in documents {
        let content_hash = xxh64(doc.text.as_bytes(), 0);
        let slots = seen.entry(content_hash).or_default();

        let original_id = slots
            .iter()
            .map(|&slot| &outcome.unique[slot])
            .find(|prior| prior.text == doc.text)
            .map(|prior| prior.id.clone());

        match original_id {
            Some(original_id) => outcome.duplicates.push(ExactDuplicate {
                id: doc.id,
                original_id,
            }),
            None => {
                slots.push(outcome.unique.len());
                outcome.unique.push(doc);
            }
        }
    }

    tracing::info!(
        unique = outcome.unique.len(),
        duplicates = outcome.duplicates.len(),
        "Exact duplicates removed"
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_byte_identical_text() {
        let docs = vec![
            Document::new("1", "the cat sat"),
            Document::new("2", "the cat sat"),
            Document::new("3", "a dog ran"),
        ];
        let outcome = remove_exact_duplicates(docs);

        let ids: Vec<&str> = outcome.unique.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(
            outcome.duplicates,
            vec![ExactDuplicate {
                id: "2".to_string(),
                original_id: "1".to_string()
            }]
        );
    }

    #[test]
    fn test_normalized_equal_is_not_exact() {
        let docs = vec![Document::new("1", "The Cat"), Document::new("2", "the cat")];
        let outcome = remove_exact_duplicates(docs);
        assert_eq!(outcome.unique.len(), 2);
        assert!(outcome.duplicates.is_empty());
    }

    #[test]
    fn test_every_repeat_points_at_first() {
        let docs = vec![
            Document::new("a", "x"),
            Document::new("b", "x"),
            Document::new("c", "x"),
        ];
        let outcome = remove_exact_duplicates(docs);
        assert_eq!(outcome.unique.len(), 1);
        assert!(outcome.duplicates.iter().all(|d| d.original_id == "a"));
    }
}
