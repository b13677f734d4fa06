use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("io ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("codec: {0}")]
    Codec(#[from] vectra_codec::CodecError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("protobuf encode: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("protobuf decode: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl CliError {
    pub fn io(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| CliError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
