//! Server error envelope
//!
//! Shape shared by the REST API and the command stream:
//! `{"errors":[{"code":"...","title":"...","detail":"..."}]}`

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single server-reported error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerError {
    pub code: String,
    pub title: String,
    pub detail: String,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, code: {}, details: {}",
            self.title, self.code, self.detail
        )
    }
}

/// Ordered list of server-reported errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<ServerError>,
}

impl ErrorEnvelope {
    /// Envelope holding a single error
    pub fn single(
        code: impl Into<String>,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            errors: vec![ServerError {
                code: code.into(),
                title: title.into(),
                detail: detail.into(),
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorEnvelope {}
