use huelog_style::StyleError;
use thiserror::Error;

/// Errors from compiling formats and building themes.
#[derive(Debug, Error)]
pub enum Error {
    /// The format failed to compile or execute as a style.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// A palette could not be substituted into a theme skeleton.
    #[error("theme template error: {0}")]
    ThemeTemplate(#[from] minijinja::Error),

    /// A palette document could not be parsed.
    #[error("palette error: {0}")]
    Palette(#[from] serde_yaml::Error),
}

impl Error {
    /// The style error, if this is one.
    pub fn as_style(&self) -> Option<&StyleError> {
        match self {
            Error::Style(err) => Some(err),
            _ => None,
        }
    }
}
