/// Category of a codec error. Lets callers tell bad input apart from bad
/// wire data without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input rejected before any byte is produced.
    Validation,
    /// Rows of a dense vector column disagree on length.
    DimensionMismatch,
    /// No codec mapping for a type or type combination.
    UnsupportedType,
    /// Wire payload does not match the declared type.
    DecodeShape,
    /// Invalid codec options.
    Config,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => f.write_str("validation"),
            ErrorKind::DimensionMismatch => f.write_str("dimension mismatch"),
            ErrorKind::UnsupportedType => f.write_str("unsupported type"),
            ErrorKind::DecodeShape => f.write_str("decode shape"),
            ErrorKind::Config => f.write_str("config"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("column has no rows")]
    EmptyColumn,

    #[error("{0}")]
    Validation(String),

    #[error("column '{field}' has {actual} rows, expected {expected}")]
    RowCountMismatch { field: String, expected: usize, actual: usize },

    #[error("row {row} has dimension {actual}, expected {expected}")]
    DimensionMismatch { row: usize, expected: usize, actual: usize },

    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("{0}")]
    DecodeShape(String),

    #[error("protobuf decode: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::EmptyColumn
            | CodecError::Validation(_)
            | CodecError::RowCountMismatch { .. }
            | CodecError::Json(_) => ErrorKind::Validation,
            CodecError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            CodecError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            CodecError::DecodeShape(_) | CodecError::Protobuf(_) => ErrorKind::DecodeShape,
            CodecError::Config { .. } => ErrorKind::Config,
            CodecError::Field { source, .. } => source.kind(),
        }
    }

    /// Attach the column name, preserving the original kind.
    pub fn with_field(self, field: impl Into<String>) -> Self {
        CodecError::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        CodecError::Validation(msg.into())
    }

    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        CodecError::DecodeShape(msg.into())
    }

    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        CodecError::UnsupportedType(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_context_keeps_kind() {
        let err = CodecError::DimensionMismatch { row: 1, expected: 2, actual: 3 }.with_field("emb");
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        assert_eq!(err.to_string(), "field 'emb': row 1 has dimension 3, expected 2");
    }

    #[test]
    fn json_errors_are_validation() {
        let err: CodecError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
