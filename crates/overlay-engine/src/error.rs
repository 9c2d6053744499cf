use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Failed to encode overlay content: {0}")]
    RenderError(String),

    #[error("Stamp operation failed: {0}")]
    StampError(String),
}
