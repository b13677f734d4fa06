use prost::Message;
use vectra_api::FieldData;
use vectra_codec::{Column, FieldCodec};

use crate::config::DecodeArgs;
use crate::error::CliError;

/// Split a stream of length-delimited `FieldData` messages.
pub(crate) fn read_fields(mut bytes: &[u8]) -> Result<Vec<FieldData>, CliError> {
    let mut fields = Vec::new();
    while !bytes.is_empty() {
        fields.push(FieldData::decode_length_delimited(&mut bytes)?);
    }
    Ok(fields)
}

pub fn run(args: DecodeArgs) -> Result<(), CliError> {
    let codec = FieldCodec::new(args.codec.options()?);
    let fields = read_fields(&super::read(&args.input)?)?;
    let columns: Vec<Column> = codec.decode_batch(&fields)?;
    tracing::info!(columns = columns.len(), input = %args.input.display(), "columns decoded");

    let json = serde_json::to_string_pretty(&columns)?;
    match &args.output {
        Some(path) => super::write(path, json.as_bytes()),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
