use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Template invalid: {0}")]
    TemplateInvalid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
