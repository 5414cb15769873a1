use thiserror::Error;

pub type Result<T> = std::result::Result<T, CurationError>;

#[derive(Error, Debug)]
pub enum CurationError {
    #[error(transparent)]
    Ontology(#[from] earmark_ontology::OntologyError),
}
