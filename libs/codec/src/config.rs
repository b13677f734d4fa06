use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

// ═══════════════════════════════════════════════════════════════
//  Narrowing
// ═══════════════════════════════════════════════════════════════

/// What to do when a 32-bit wire integer does not fit the declared
/// Int8/Int16 column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Narrowing {
    /// Two's-complement truncation (`as` cast). Compatible with existing
    /// clients.
    #[default]
    Truncate,
    /// Reject the payload with a decode-shape error.
    Reject,
}

// ═══════════════════════════════════════════════════════════════
//  Codec Options
// ═══════════════════════════════════════════════════════════════

/// Codec settings. Every key is optional in TOML:
///
/// ```toml
/// narrowing = "reject"
/// dynamic_field = "$meta"
/// query_tag = "$0"
/// scratch_pool_limit = 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub narrowing: Narrowing,
    /// Name of the schema-less side-channel column.
    pub dynamic_field: String,
    /// Tag of the placeholder carrying query vectors.
    pub query_tag: String,
    /// Idle scratch buffers kept per thread.
    pub scratch_pool_limit: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            narrowing: Narrowing::Truncate,
            dynamic_field: default_dynamic_field(),
            query_tag: default_query_tag(),
            scratch_pool_limit: 8,
        }
    }
}

fn default_dynamic_field() -> String {
    "$meta".into()
}
fn default_query_tag() -> String {
    "$0".into()
}

impl CodecOptions {
    pub fn from_toml_str(content: &str) -> Result<Self, CodecError> {
        let options: CodecOptions = toml::from_str(content).map_err(|e| CodecError::Config {
            context: "parse",
            detail: e.to_string(),
        })?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CodecError::Config {
            context: "read",
            detail: format!("'{}': {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), CodecError> {
        if self.dynamic_field.is_empty() {
            return Err(CodecError::Config {
                context: "validate",
                detail: "dynamic_field must not be empty".into(),
            });
        }
        if self.query_tag.is_empty() {
            return Err(CodecError::Config {
                context: "validate",
                detail: "query_tag must not be empty".into(),
            });
        }
        Ok(())
    }
}
