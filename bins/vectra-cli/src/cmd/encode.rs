use prost::Message;
use vectra_codec::{Column, FieldCodec};

use crate::config::EncodeArgs;
use crate::error::CliError;

pub fn run(args: EncodeArgs) -> Result<(), CliError> {
    let codec = FieldCodec::new(args.codec.options()?);
    let columns: Vec<Column> = serde_json::from_slice(&super::read(&args.input)?)?;

    let fields = codec.encode_batch(&columns)?;
    let mut out = Vec::new();
    for field in &fields {
        field.encode_length_delimited(&mut out)?;
    }
    super::write(&args.output, &out)?;

    tracing::info!(
        columns = fields.len(),
        rows = columns.first().map_or(0, Column::row_count),
        bytes = out.len(),
        output = %args.output.display(),
        "columns encoded"
    );
    Ok(())
}
