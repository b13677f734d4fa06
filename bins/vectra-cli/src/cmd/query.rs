use vectra_codec::{AnnQueryEncoder, QueryVector, QueryVectors};

use crate::config::QueryArgs;
use crate::error::CliError;

pub fn run(args: QueryArgs) -> Result<(), CliError> {
    let encoder = AnnQueryEncoder::new(&args.codec.options()?);
    let vectors: Vec<QueryVector> = serde_json::from_slice(&super::read(&args.input)?)?;
    let batch = QueryVectors::from_vectors(vectors)?;

    let bytes = encoder.encode_bytes(&batch)?;
    super::write(&args.output, &bytes)?;
    tracing::info!(
        vectors = batch.len(),
        kind = ?batch.placeholder_type(),
        bytes = bytes.len(),
        "query placeholder written"
    );
    Ok(())
}
