//! Backend capability interface
//!
//! The suggestion scorer only needs topic priors and per-topic word
//! distributions in log space. Any fitting backend that produces that pair
//! is substitutable; EM is the one shipped here.

use crate::em::{self, EmConfig};
use crate::error::Result;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// The output shape every fitting backend must produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicDistributions {
    /// Log topic priors, length t
    pub log_pi: Array1<f64>,

    /// Per-topic log word distributions, shape (t x d)
    pub log_p: Array2<f64>,
}

impl TopicDistributions {
    /// Index and probability of the highest-prior topic
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
}

/// A topic-model fitting backend
pub trait TopicBackend {
    /// Fit `topics` clusters to a document-term count matrix
    fn fit_topics(&self, x: &Array2<f64>, topics: usize) -> Result<TopicDistributions>;
}

/// Expectation-maximization backend
#[derive(Debug, Clone)]
pub struct EmBackend {
    pub iterations: usize,
    pub seed: u64,
}

impl Default for EmBackend {
    fn default() -> Self {
        Self {
            iterations: em::DEFAULT_ITERATIONS,
            seed: em::DEFAULT_SEED,
        }
    }
}

impl TopicBackend for EmBackend {
    fn fit_topics(&self, x: &Array2<f64>, topics: usize) -> Result<TopicDistributions> {
        let model = em::fit(
            x,
            &EmConfig {
                topics,
                iterations: self.iterations,
                seed: self.seed,
            },
        )?;

        Ok(TopicDistributions {
            log_pi: model.log_pi,
            log_p: model.log_p,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_em_backend_output_shape() {
        let x = array![[2.0, 1.0, 0.0], [0.0, 1.0, 3.0]];
        let backend = EmBackend {
            iterations: 10,
            seed: 11,
        };
        let dists = backend.fit_topics(&x, 2).unwrap();
        assert_eq!(dists.log_pi.len(), 2);
        assert_eq!(dists.log_p.dim(), (2, 3));
    }

    #[test]
    fn test_em_backend_rejects_zero_topics() {
        let x = array![[1.0, 1.0]];
        let backend = EmBackend::default();
        assert!(backend.fit_topics(&x, 0).is_err());
    }

    #[test]
    fn test_top_topic_ties_keep_lowest_index() {
        let dists = TopicDistributions {
            log_pi: array![(0.5f64).ln(), (0.5f64).ln()],
            log_p: Array2::zeros((2, 1)),
        };
        assert_eq!(dists.top_topic().0, 0);
    }
}
