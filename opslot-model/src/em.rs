//! Expectation-maximization fitting of a multinomial mixture model.
//!
//! Every document (one hour slot's token counts) is treated as a sequence of
//! independent multinomial draws from one of `t` latent topics. All
//! probabilities live in natural-log space for the whole fitting loop;
//! conversion back to probability space happens only at presentation
//! boundaries.
//!
//! The loop runs a fixed number of E/M cycles with no early stopping, so a
//! given seed and input always reproduce the same parameters.

use crate::error::{ModelError, Result};
use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Floor added to expected word counts before the log, keeping zero counts
/// from propagating -inf through the M-step.
const COUNT_FLOOR: f64 = 1e-100;

/// Default number of E/M cycles
pub const DEFAULT_ITERATIONS: usize = 100;

/// Default initialization seed
pub const DEFAULT_SEED: u64 = 12345;

/// EM fitting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmConfig {
    /// Number of latent topics
    pub topics: usize,

    /// Number of E/M cycles to run (always exactly this many)
    pub iterations: usize,

    /// Seed for the word-distribution initialization
    pub seed: u64,
}

impl EmConfig {
    /// Configuration for `topics` clusters with the default iteration count
    /// and seed. There is no default topic count: choosing one is the
    /// caller's decision (the CLI derives it from the vocabulary size).
    pub fn new(topics: usize) -> Self {
        Self {
            topics,
            iterations: DEFAULT_ITERATIONS,
            seed: DEFAULT_SEED,
        }
    }
}

/// A fitted multinomial mixture model. Immutable once fitting completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixtureModel {
    /// Log topic priors, length t; sums to 1 in probability space
    pub log_pi: Array1<f64>,

    /// Per-topic log word distributions, shape (t x d); each row sums to 1
    /// in probability space
    pub log_p: Array2<f64>,

    /// Log responsibilities, shape (N x t); each row sums to 1 in
    /// probability space
    pub log_w: Array2<f64>,
}

impl MixtureModel {
    /// Index and probability of the highest-prior topic. Ties keep the
    /// lowest index.
    pub fn top_topic(&self) -> (usize, f64) {
        let mut best = (0, f64::NEG_INFINITY);
        for (idx, &lp) in self.log_pi.iter().enumerate() {
            let p = lp.exp();
            if p > best.1 {
                best = (idx, p);
            }
        }
        best
    }

    /// Top `n` tokens per topic by descending log-probability. `ranking`
    /// must be aligned 1:1 with the model's vocabulary columns.
    pub fn top_words(&self, ranking: &[String], n: usize) -> Result<Vec<Vec<String>>> {
        let d = self.log_p.ncols();
        if ranking.len() != d {
            return Err(ModelError::ShapeMismatch {
                expected: d,
                got: ranking.len(),
            });
        }

        let mut per_topic = Vec::with_capacity(self.log_p.nrows());
        for row in self.log_p.rows() {
            let mut indices: Vec<usize> = (0..d).collect();
            indices.sort_by(|&a, &b| {
                row[b].partial_cmp(&row[a]).unwrap_or(std::cmp::Ordering::Equal)
            });
            per_topic.push(
                indices
                    .into_iter()
                    .take(n)
                    .map(|i| ranking[i].clone())
                    .collect(),
            );
        }
        Ok(per_topic)
    }
}

/// Fit a multinomial mixture model to a document-term count matrix.
///
/// `x` has shape (N documents x d words), non-negative counts. Priors start
/// uniform; word distributions start from a seeded uniform draw over [0,1)
/// per cell, L1-normalized per row before the log.
pub fn fit(x: &Array2<f64>, config: &EmConfig) -> Result<MixtureModel> {
    let (n, d) = x.dim();
    let t = config.topics;

    if t == 0 {
        return Err(ModelError::InvalidTopicCount { got: t });
    }
    if config.iterations == 0 {
        return Err(ModelError::InvalidIterations { got: 0 });
    }
    if n == 0 || d == 0 {
        return Err(ModelError::EmptyMatrix { rows: n, cols: d });
    }

    info!(
        "Fitting mixture model: {} documents, {} words, {} topics, {} iterations",
        n, d, t, config.iterations
    );

    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut log_pi = Array1::from_elem(t, (1.0 / t as f64).ln());

    let mut log_p = Array2::<f64>::zeros((t, d));
    for j in 0..t {
        let mut row_sum = 0.0;
        for k in 0..d {
            let v: f64 = rng.gen();
            log_p[[j, k]] = v;
            row_sum += v;
        }
        for k in 0..d {
            log_p[[j, k]] = (log_p[[j, k]] / row_sum).ln();
        }
    }

    let mut log_w = Array2::<f64>::zeros((n, t));

    for iteration in 0..config.iterations {
        log_w = find_log_w(x, &log_p, &log_pi);

        log_p = update_log_p(x, &log_w);
        log_pi = update_log_pi(&log_w);

        if (iteration + 1) % 50 == 0 {
            debug!("EM iteration {}/{}", iteration + 1, config.iterations);
        }
    }

    Ok(MixtureModel {
        log_pi,
        log_p,
        log_w,
    })
}

/// E-step: log responsibilities of each topic for each document.
///
/// `log_r[i][j] = log_pi[j] + dot(x[i], log_p[j])`, then each row is
/// normalized by log-sum-exp so it sums to 1 in probability space.
pub fn find_log_w(x: &Array2<f64>, log_p: &Array2<f64>, log_pi: &Array1<f64>) -> Array2<f64> {
    let n = x.nrows();
    let t = log_pi.len();

    let mut log_r = x.dot(&log_p.t());
    for i in 0..n {
        for j in 0..t {
            log_r[[i, j]] += log_pi[j];
        }
    }

    for i in 0..n {
        let norm = log_sum_exp(log_r.row(i));
        for j in 0..t {
            log_r[[i, j]] -= norm;
        }
    }

    log_r
}

/// M-step, word distributions: responsibility-weighted expected counts per
/// topic, floored before the log, then row-normalized in log space.
pub fn update_log_p(x: &Array2<f64>, log_w: &Array2<f64>) -> Array2<f64> {
    let expected = log_w.mapv(f64::exp).t().dot(x) + COUNT_FLOOR;
    let mut log_p = expected.mapv(f64::ln);

    for mut row in log_p.rows_mut() {
        let norm = log_sum_exp(row.view());
        row.mapv_inplace(|v| v - norm);
    }

    log_p
}

/// M-step, topic priors: mean responsibility mass per topic across all
/// documents, kept in log space.
pub fn update_log_pi(log_w: &Array2<f64>) -> Array1<f64> {
    let (n, t) = log_w.dim();
    let log_n = (n as f64).ln();

    Array1::from_iter((0..t).map(|j| log_sum_exp(log_w.column(j)) - log_n))
}

/// Log of a sum of exponentials without overflow or underflow.
fn log_sum_exp(values: ArrayView1<'_, f64>) -> f64 {
    let max_val = values.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    if max_val.is_infinite() {
        return max_val;
    }
    max_val + values.iter().map(|&v| (v - max_val).exp()).sum::<f64>().ln()
}
