use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChlogError>;

#[derive(Error, Debug)]
pub enum ChlogError {
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Clone error: {0}")]
    Clone(#[from] Box<gix::clone::Error>),
    #[error("Fetch error: {0}")]
    Fetch(#[from] Box<gix::clone::fetch::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("LLM endpoint error: {0}")]
    Llm(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::discover::Error> for ChlogError {
    fn from(err: gix::discover::Error) -> Self {
        ChlogError::GitDiscover(Box::new(err))
    }
}

impl From<gix::clone::Error> for ChlogError {
    fn from(err: gix::clone::Error) -> Self {
        ChlogError::Clone(Box::new(err))
    }
}

impl From<gix::clone::fetch::Error> for ChlogError {
    fn from(err: gix::clone::fetch::Error) -> Self {
        ChlogError::Fetch(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for ChlogError {
    fn from(err: gix::object::commit::Error) -> Self {
        ChlogError::Commit(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for ChlogError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        ChlogError::ObjectFind(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for ChlogError {
    fn from(err: gix::objs::decode::Error) -> Self {
        ChlogError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for ChlogError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        ChlogError::DiffTreeToTree(Box::new(err))
    }
}
