//! Backend selection

use crate::core::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage/execution environment a pipeline runs against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Backend {
    /// Distributed compute session with run tracking
    Databricks,
    /// Local filesystem, no session
    #[default]
    Local,
}

impl Backend {
    /// All recognized backends, in declaration order
    pub const ALL: [Backend; 2] = [Backend::Databricks, Backend::Local];

    /// Wire name of the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Databricks => "databricks",
            Backend::Local => "local",
        }
    }

    /// Names of every recognized backend
    pub fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(Backend::as_str).collect()
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|backend| backend.as_str() == s)
            .ok_or_else(|| PipelineError::UnsupportedBackend {
                value: s.to_string(),
                valid: Self::values(),
            })
    }
}

impl TryFrom<String> for Backend {
    type Error = PipelineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Backend> for String {
    fn from(backend: Backend) -> Self {
        backend.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_backends() {
        assert_eq!("local".parse::<Backend>().unwrap(), Backend::Local);
        assert_eq!("databricks".parse::<Backend>().unwrap(), Backend::Databricks);
    }

    #[test]
    fn test_parse_unknown_backend_lists_valid_values() {
        let err = "azure".parse::<Backend>().unwrap_err();
        match &err {
            PipelineError::UnsupportedBackend { value, valid } => {
                assert_eq!(value, "azure");
                assert_eq!(valid, &vec!["databricks", "local"]);
            }
            other => panic!("Expected UnsupportedBackend, got {:?}", other),
        }
        assert!(err.to_string().contains("[\"databricks\", \"local\"]"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Local".parse::<Backend>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let backend: Backend = serde_yaml::from_str("databricks").unwrap();
        assert_eq!(backend, Backend::Databricks);
        assert!(serde_yaml::from_str::<Backend>("azure").is_err());
        assert_eq!(serde_yaml::to_string(&Backend::Local).unwrap().trim(), "local");
    }

    #[test]
    fn test_default_is_local() {
        assert_eq!(Backend::default(), Backend::Local);
    }
}
