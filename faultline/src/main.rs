#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod decode;
mod stream;

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read},
};

use args::Args;
use clap::Parser;
use faultline_config::Config;
use faultline_normalize::Normalizer;
use stream::Mode;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match args.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Initialize logging
    faultline_telemetry::init(&config.logging)?;

    let normalizer = Normalizer::from_config(&config.normalizer);

    tracing::debug!(?normalizer, schema = args.schema, client = args.client, "starting faultline");

    let reader: Box<dyn Read> = match args.input.as_deref() {
        Some(path) => Box::new(BufReader::new(
            File::open(path).map_err(|e| anyhow::anyhow!("failed to open input {}: {e}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mode = Mode {
        schema: args.schema,
        client: args.client,
    };
    let documents = stream::run(&normalizer, mode, reader, BufWriter::new(io::stdout().lock()))?;

    tracing::info!(documents, "normalization finished");
    Ok(())
}
