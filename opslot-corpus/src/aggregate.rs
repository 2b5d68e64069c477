//! Corpus aggregation: per-slot token tallies, global token ranking, and
//! the dense document-term matrix consumed by the fitting engine.
//!
//! Row/column alignment is load-bearing: row *i* of the matrix is the *i*-th
//! slot of the ascending slot list, column *j* is the *j*-th token of the
//! ranking. Every downstream lookup assumes this alignment.

use crate::counts::CountTable;
use crate::error::{CorpusError, Result};
use crate::metadata::{EventRecord, HourSlot};
use ndarray::Array2;
use std::collections::HashMap;
use tracing::{debug, info};

/// Aggregated training corpus
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Unique tokens, descending global frequency, ties by first appearance
    ranking: Vec<String>,

    /// Token -> position in `ranking`
    rank_index: HashMap<String, usize>,

    /// Hour slots in ascending order; fixes matrix row order
    slots: Vec<HourSlot>,

    /// Hour slots in first-encounter order; fixes slot-lookup iteration
    slot_order: Vec<HourSlot>,

    /// Per-slot token tallies (zero counts never materialized)
    slot_counts: HashMap<HourSlot, CountTable>,

    /// Document-term counts, shape (slots x ranked tokens)
    matrix: Array2<f64>,
}

impl Corpus {
    /// Aggregate grouped event records into a corpus.
    ///
    /// Each record contributes one count per token occurrence to every slot
    /// it is tagged with, independently. Metadata with no observed slots is
    /// an error: fitting on a zero-row matrix is undefined.
    pub fn from_metadata(groups: &[Vec<EventRecord>]) -> Result<Corpus> {
        let (slot_order, slot_counts) = tally_slots(groups);

        if slot_counts.is_empty() {
            return Err(CorpusError::EmptyMetadata);
        }

        let mut slots = slot_order.clone();
        slots.sort_unstable();

        // Merge per-slot tallies (sorted slot order) into the global table
        // that defines the ranking.
        let mut totals = CountTable::new();
        for slot in &slots {
            totals.merge(&slot_counts[slot]);
        }

        let ranking = totals.ranked();
        let rank_index: HashMap<String, usize> = ranking
            .iter()
            .enumerate()
            .map(|(i, tok)| (tok.clone(), i))
            .collect();

        let mut matrix = Array2::<f64>::zeros((slots.len(), ranking.len()));
        for (row, slot) in slots.iter().enumerate() {
            for (tok, count) in slot_counts[slot].iter() {
                matrix[[row, rank_index[tok]]] = count as f64;
            }
        }

        info!(
            "Aggregated corpus: {} hour slots, {} unique tokens",
            slots.len(),
            ranking.len()
        );

        Ok(Corpus {
            ranking,
            rank_index,
            slots,
            slot_order,
            slot_counts,
            matrix,
        })
    }

    /// Token ranking, descending global frequency
    pub fn ranking(&self) -> &[String] {
        &self.ranking
    }

    /// Ranking position of `token`, if in vocabulary
    pub fn rank_of(&self, token: &str) -> Option<usize> {
        self.rank_index.get(token).copied()
    }

    pub fn vocab_size(&self) -> usize {
        self.ranking.len()
    }

    /// Hour slots in ascending order (matrix row order)
    pub fn slots(&self) -> &[HourSlot] {
        &self.slots
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Per-slot tallies in slot first-encounter order
    pub fn slot_tallies(&self) -> impl Iterator<Item = (HourSlot, &CountTable)> + '_ {
        self.slot_order
            .iter()
            .map(move |slot| (*slot, &self.slot_counts[slot]))
    }

    /// Count of `token` within `slot`, if both were observed together
    pub fn slot_count(&self, slot: HourSlot, token: &str) -> Option<u32> {
        self.slot_counts.get(&slot).and_then(|t| t.get(token))
    }

    /// Document-term count matrix, shape (slots x ranked tokens)
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }
}

/// Tally token counts per hour slot across all records.
///
/// Returns slots in first-encounter order alongside their tables. A record's
/// slot list is deduplicated so one record counts at most once per slot.
fn tally_slots(
    groups: &[Vec<EventRecord>],
) -> (Vec<HourSlot>, HashMap<HourSlot, CountTable>) {
    let mut order: Vec<HourSlot> = Vec::new();
    let mut counts: HashMap<HourSlot, CountTable> = HashMap::new();

    for group in groups {
        for record in group {
            let mut seen: Vec<HourSlot> = Vec::new();
            for &slot in &record.hour_ops {
                if seen.contains(&slot) {
                    continue;
                }
                seen.push(slot);

                let table = counts.entry(slot).or_insert_with(|| {
                    order.push(slot);
                    CountTable::new()
                });
                for tok in &record.tokens {
                    table.add(tok, 1);
                }
            }
        }
    }

    debug!("Tallied {} hour slots", order.len());
    (order, counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(hours: &[u32], tokens: &[&str]) -> EventRecord {
        EventRecord {
            request_id: None,
            hour_ops: hours.to_vec(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_record_counts_once_per_slot() {
        // 3 tokens, 2 slots: 3 counts to each slot independently.
        let groups = vec![vec![rec(&[9, 22], &["pump", "leak", "pump"])]];
        let corpus = Corpus::from_metadata(&groups).unwrap();

        assert_eq!(corpus.slot_count(9, "pump"), Some(2));
        assert_eq!(corpus.slot_count(9, "leak"), Some(1));
        assert_eq!(corpus.slot_count(22, "pump"), Some(2));
        assert_eq!(corpus.slot_count(22, "leak"), Some(1));
    }

    #[test]
    fn test_duplicate_slot_tags_deduplicated() {
        let groups = vec![vec![rec(&[9, 9], &["pump"])]];
        let corpus = Corpus::from_metadata(&groups).unwrap();
        assert_eq!(corpus.slot_count(9, "pump"), Some(1));
    }

    #[test]
    fn test_slot_rows_sorted_ascending() {
        let groups = vec![vec![
            rec(&[22], &["filter"]),
            rec(&[3], &["pump"]),
            rec(&[9], &["leak"]),
        ]];
        let corpus = Corpus::from_metadata(&groups).unwrap();
        assert_eq!(corpus.slots(), &[3, 9, 22]);

        // Encounter order for slot lookups is unsorted.
        let order: Vec<u32> = corpus.slot_tallies().map(|(s, _)| s).collect();
        assert_eq!(order, vec![22, 3, 9]);
    }

    #[test]
    fn test_matrix_aligned_with_ranking_and_slots() {
        let groups = vec![vec![
            rec(&[9], &["pump", "pump", "leak"]),
            rec(&[22], &["pump"]),
        ]];
        let corpus = Corpus::from_metadata(&groups).unwrap();

        // pump: 3 total, leak: 1 total.
        assert_eq!(corpus.ranking(), &["pump".to_string(), "leak".to_string()]);

        let x = corpus.matrix();
        assert_eq!(x.shape(), &[2, 2]);
        // Row 0 = slot 9, row 1 = slot 22.
        assert_eq!(x[[0, 0]], 2.0);
        assert_eq!(x[[0, 1]], 1.0);
        assert_eq!(x[[1, 0]], 1.0);
        assert_eq!(x[[1, 1]], 0.0);
    }

    #[test]
    fn test_ranking_tie_break_by_first_appearance() {
        // alpha:2 gamma:1 beta:2, alpha encountered before beta.
        let groups = vec![vec![
            rec(&[1], &["alpha", "gamma"]),
            rec(&[2], &["beta", "alpha", "beta"]),
        ]];
        let corpus = Corpus::from_metadata(&groups).unwrap();
        assert_eq!(
            corpus.ranking(),
            &["alpha".to_string(), "beta".to_string(), "gamma".to_string()]
        );
    }

    #[test]
    fn test_empty_metadata_rejected() {
        let err = Corpus::from_metadata(&[]).unwrap_err();
        assert!(matches!(err, CorpusError::EmptyMetadata));

        // Records without slot tags contribute nothing.
        let groups = vec![vec![rec(&[], &["pump"])]];
        assert!(Corpus::from_metadata(&groups).is_err());
    }

    #[test]
    fn test_aggregation_idempotent() {
        let groups = vec![vec![
            rec(&[9, 22], &["pump", "leak"]),
            rec(&[3], &["filter", "pump"]),
        ]];
        let a = Corpus::from_metadata(&groups).unwrap();
        let b = Corpus::from_metadata(&groups).unwrap();

        assert_eq!(a.ranking(), b.ranking());
        assert_eq!(a.slots(), b.slots());
        assert_eq!(a.matrix(), b.matrix());
        let ta: Vec<_> = a.slot_tallies().map(|(s, t)| (s, t.clone())).collect();
        let tb: Vec<_> = b.slot_tallies().map(|(s, t)| (s, t.clone())).collect();
        assert_eq!(ta, tb);
    }
}
