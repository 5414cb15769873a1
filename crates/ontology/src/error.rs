use thiserror::Error;

pub type Result<T> = std::result::Result<T, OntologyError>;

#[derive(Error, Debug)]
pub enum OntologyError {
    #[error("Node {parent} references missing child id: {child}")]
    MissingChild { parent: String, child: String },

    #[error("Duplicate node id: {id}")]
    DuplicateId { id: String },

    #[error("Duplicate display name: {name}")]
    DuplicateName { name: String },

    #[error("Taxonomy contains a cycle through node: {id}")]
    Cycle { id: String },

    #[error("Node not found: {0}")]
    NotFound(String),

    #[error("Invalid taxonomy description: {0}")]
    Parse(#[from] serde_json::Error),
}
