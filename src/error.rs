//! Error types shared by the loader, the command line surface and the window.
use std::{error::Error, fmt::Display};

/// Result type used throughout the crate.
pub type CausticResult<T> = std::result::Result<T, CausticError>;

/// Errors that abort the viewer before or while it starts up.
#[derive(Debug, PartialEq, Eq)]
pub enum CausticError {
    /// invalid command line values
    Arguments(String),
    /// the mesh file could not be opened or read
    MeshFile(String),
    /// the mesh was read but holds no usable geometry
    Geometry(String),
    /// window or graphics backend initialization failed
    Display(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for CausticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arguments(m) => write!(f, "Arguments:{m}"),
            Self::MeshFile(m) => write!(f, "MeshFile:{m}"),
            Self::Geometry(m) => write!(f, "Geometry:{m}"),
            Self::Display(m) => write!(f, "Display:{m}"),
            Self::Other(m) => write!(f, "Caustics Error:Other:{m}"),
        }
    }
}
impl Error for CausticError {}

impl From<String> for CausticError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
