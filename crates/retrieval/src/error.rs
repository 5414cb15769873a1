use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrievalError>;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Label set is empty")]
    EmptyLabelSet,

    #[error("Label set references unknown class: {0}")]
    UnknownLabel(String),

    #[error(transparent)]
    Ontology(#[from] earmark_ontology::OntologyError),
}
