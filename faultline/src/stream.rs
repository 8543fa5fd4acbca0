use std::io::{Read, Write};

use faultline_adapters::SchemaErrors;
use faultline_normalize::Normalizer;
use serde_json::Value;

use crate::decode;

/// How each input document is read and printed
#[derive(Debug, Clone, Copy, Default)]
pub struct Mode {
    /// Documents are schema validator errors
    pub schema: bool,
    /// Print the client-safe view
    pub client: bool,
}

/// Normalize a stream of JSON documents, one output line per document
///
/// Under `schema`, a well-formed document that is not a schema error list is
/// logged and skipped. Malformed JSON stops the stream, since the reader
/// cannot resynchronize after a syntax error.
///
/// Returns the number of lines written.
pub fn run(normalizer: &Normalizer, mode: Mode, reader: impl Read, mut out: impl Write) -> anyhow::Result<usize> {
    let mut written = 0_usize;

    for (index, document) in serde_json::Deserializer::from_reader(reader).into_iter::<Value>().enumerate() {
        let document = document.map_err(|e| anyhow::anyhow!("invalid JSON input at document {index}: {e}"))?;

        let error = if mode.schema {
            match SchemaErrors::from_value(document) {
                Ok(errors) => normalizer.schema_errors(errors),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping document that is not a schema error list");
                    continue;
                }
            }
        } else {
            normalizer.normalize(decode::failure(document))
        };

        if mode.client {
            serde_json::to_writer(&mut out, &error.client_view())?;
        } else {
            serde_json::to_writer(&mut out, &error)?;
        }
        out.write_all(b"\n")?;

        written += 1;
    }

    out.flush()?;

    Ok(written)
}
