pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid flow document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Layout(#[from] otter::LayoutError),
}
