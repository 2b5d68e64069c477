//! # Opslot Corpus
//!
//! Turns grouped maintenance event metadata into the numeric inputs the
//! topic model consumes:
//! - a global token ranking (descending frequency, stable ties),
//! - per-hour-slot token count tables,
//! - a dense document-term count matrix aligned with both.
//!
//! Also hosts the boundary collaborators of the pipeline: the event summary
//! tokenizer and the JSON metadata loader.

pub mod aggregate;
pub mod counts;
pub mod error;
pub mod metadata;
pub mod tokenizer;

pub use aggregate::Corpus;
pub use counts::CountTable;
pub use error::{CorpusError, Result};
pub use metadata::{load_metadata, EventRecord, HourSlot};
pub use tokenizer::{Tokenizer, TokenizerConfig, DEFAULT_IGNORE};
