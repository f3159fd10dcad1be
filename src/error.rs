pub type Result<T> = std::result::Result<T, RenderError>;

/// Hard failures of a render or export pass. Recoverable conditions
/// (unsupported styles, malformed paths, numeric degeneracy) are logged and
/// worked around instead of surfacing here.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("i/o error while writing renderer output")]
    Io(#[from] std::io::Error),

    #[error("renderer backend error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid renderer parameter: {0}")]
    InvalidParam(String),
}

impl RenderError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        RenderError::Backend(Box::new(err))
    }
}

#[cfg(feature = "png")]
impl From<png::EncodingError> for RenderError {
    fn from(err: png::EncodingError) -> Self {
        RenderError::Backend(Box::new(err))
    }
}

#[cfg(feature = "cairo")]
impl From<cairo::Error> for RenderError {
    fn from(err: cairo::Error) -> Self {
        RenderError::Backend(Box::new(err))
    }
}
