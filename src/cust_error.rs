//! This module contains all custom errors used in this library.

use std::fmt;
use std::error::Error;

#[derive(Debug)]
pub enum ImportError {
    IoError(std::io::Error),
    /// Line number (1-based) and a short reason.
    InputMalformedError(usize, String),
    BadIntError(std::num::ParseIntError),
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> ImportError {
        ImportError::IoError(e)
    }
}

impl From<std::num::ParseIntError> for ImportError {
    fn from(e: std::num::ParseIntError) -> ImportError {
        ImportError::BadIntError(e)
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "Import: IoError ({})", e),
            Self::InputMalformedError(line, msg) => write!(f, "Import: Input is malformed at line {}: {}", line, msg),
            Self::BadIntError(e) => write!(f, "Import: Integer is malformed ({}).", e),
        }
    }
}

impl Error for ImportError {}

#[derive(Debug, PartialEq, Eq)]
pub enum ProcessingError {
    InvalidParameter(String),
    /// The configured weight dimension differs from the one of the graph.
    DimensionMismatch { expected: usize, found: usize },
    InvalidSolution(String),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Self::DimensionMismatch { expected, found } => write!(f, "Dimension mismatch: configured {} weight(s) per vertex, graph has {}", expected, found),
            Self::InvalidSolution(msg) => write!(f, "InvalidSolution: {}", msg),
        }
    }
}

impl Error for ProcessingError {}
