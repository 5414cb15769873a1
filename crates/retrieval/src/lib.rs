//! # Earmark Retrieval
//!
//! Term-vector retrieval: match free-text clip metadata against a set of
//! taxonomy classes.
//!
//! ## Architecture
//!
//! ```text
//! label set + ontology
//!     │
//!     ├──> Vocabulary (built once per label set)
//!     │      ├─ Terms of every class label, canonicalized
//!     │      ├─ Terms of every direct child label, credited to the parent
//!     │      └─ Sorted term space + binary membership matrix
//!     │
//! metadata entries
//!     │
//!     └──> retrieve()
//!            ├─ Normalize tags and description independently
//!            ├─ Vectorize both, sum (co-occurrence reinforces)
//!            ├─ Cosine arg-max against the label matrix
//!            └─ Keep predictions above the confidence threshold
//! ```
//!
//! Everything is pure and read-only after construction; `retrieve` fans out
//! over entries with rayon.

mod driver;
mod error;
mod lemma;
mod normalize;
mod vocabulary;

pub use driver::{retrieve, MetadataEntry, Prediction, DEFAULT_THRESHOLD};
pub use error::{Result, RetrievalError};
pub use lemma::EnglishLemmatizer;
pub use normalize::{preprocess, tokenize, Lemmatizer, PartOfSpeech, STOP_WORDS};
pub use vocabulary::{canonical_label, MatchOutcome, Vocabulary};
