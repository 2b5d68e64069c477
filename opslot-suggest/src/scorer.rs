//! Weighted token selection and hour-slot lookup
//!
//! Given fresh query tokens and one topic's word log-probabilities, picks the
//! highest-scoring in-vocabulary token under each weighting policy, then the
//! hour slot where that token has historically been most frequent.

use crate::error::{Result, SuggestError};
use crate::{SlotPick, Suggestion, TokenPick, WeightPolicy};
use ndarray::ArrayView1;
use opslot_corpus::Corpus;
use tracing::debug;

/// Pick the query token maximizing `log_p[rank(token)] / weight(position)`.
///
/// The division of the (negative) log-probability by the position weight is
/// the historical scoring rule and is kept exactly as-is for compatibility;
/// it is not a standard likelihood re-weighting.
///
/// Out-of-vocabulary tokens are skipped entirely. The running max uses
/// strict `>`, so equal scores keep the earliest occurrence. Returns `None`
/// when no query token is in the vocabulary; callers must handle that
/// explicitly.
pub fn max_log_p_token(
    query: &[String],
    corpus: &Corpus,
    log_p_row: ArrayView1<'_, f64>,
    weights: &[f64],
) -> Result<Option<TokenPick>> {
    if log_p_row.len() != corpus.vocab_size() {
        return Err(SuggestError::VocabMismatch {
            expected: corpus.vocab_size(),
            got: log_p_row.len(),
        });
    }
    if weights.len() != query.len() {
        return Err(SuggestError::WeightMismatch {
            expected: query.len(),
            got: weights.len(),
        });
    }

    let mut best: Option<TokenPick> = None;
    let mut best_score = f64::NEG_INFINITY;

    for (pos, token) in query.iter().enumerate() {
        let Some(rank) = corpus.rank_of(token) else {
            continue;
        };

        let score = log_p_row[rank] / weights[pos];
        debug!("weighted log_p x{}: {},{}", weights[pos], token, score);

        if score > best_score {
            best_score = score;
            best = Some(TokenPick {
                token: token.clone(),
                score,
            });
        }
    }

    Ok(best)
}

/// Find the hour slot where `token` is most frequent.
///
/// Slots are scanned in the table's encounter order; the running max uses
/// strict `>`, so equal counts keep the earliest slot. Returns `None` when
/// the token appears in no slot.
pub fn max_token_slot(token: &str, corpus: &Corpus) -> Option<SlotPick> {
    let mut best: Option<SlotPick> = None;

    for (slot, tallies) in corpus.slot_tallies() {
        let Some(count) = tallies.get(token) else {
            continue;
        };
        if best.as_ref().map_or(true, |b| count > b.count) {
            best = Some(SlotPick { slot, count });
        }
    }

    best
}

/// Produce one suggestion per weighting policy for a set of query tokens.
///
/// Always returns exactly two suggestions: uniform weighting first, then
/// position-decay, mirroring the historical output order.
pub fn suggest_slots(
    query: &[String],
    corpus: &Corpus,
    log_p_row: ArrayView1<'_, f64>,
) -> Result<Vec<Suggestion>> {
    let policies = [WeightPolicy::Uniform, WeightPolicy::PositionDecay];

    policies
        .iter()
        .map(|&policy| {
            let weights = policy.weights(query.len());
            let token = max_log_p_token(query, corpus, log_p_row, &weights)?;
            let slot = token
                .as_ref()
                .and_then(|pick| max_token_slot(&pick.token, corpus));

            Ok(Suggestion {
                policy,
                token,
                slot,
            })
        })
        .collect()
}
