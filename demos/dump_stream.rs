//! Decode a raw OLEDS stream extracted from a compound file and print it.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example dump_stream -- ole-stream.bin --kind ole
//! RUST_LOG=oleds=debug cargo run --example dump_stream -- compobj.bin --kind comp-obj
//! ```

use clap::{Parser, ValueEnum};
use oleds::ole::CollateGate;
use oleds::{
    CompObjStream, DecodeOptions, EmbeddedObject, LinkedObject, OleNativeStream,
    OlePresentationStream, OleStream, StreamRecord,
};
use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Record stored in the input file
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    /// `\x01Ole` stream
    Ole,
    /// `\x01CompObj` stream
    CompObj,
    /// `\x02OlePresNNN` stream
    Presentation,
    /// `\x01Ole10Native` stream
    Native,
    /// OLE 1.0 embedded object
    Embedded,
    /// OLE 1.0 linked object
    Linked,
}

/// Decode a raw MS-OLEDS stream and print the decoded record
#[derive(Parser, Debug)]
#[command(name = "dump_stream", version)]
struct Args {
    /// File holding the raw stream bytes
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Record stored in the file
    #[arg(short, long, value_enum)]
    kind: Kind,

    /// Windows code page of 8-bit strings
    #[arg(long, default_value_t = 1252)]
    codepage: u32,

    /// Gate dmCollate on the TrueType option bit like legacy producers
    #[arg(long)]
    legacy_collate: bool,
}

fn dump<R: StreamRecord + Debug>(data: &[u8], options: &DecodeOptions) -> Result<(), oleds::Error> {
    let record = R::parse_with_options(data, data.len(), options)?;
    println!("{:#?}", record);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let data = match fs::read(&args.input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args.input.display(), e);
            return ExitCode::FAILURE;
        },
    };

    let mut options = DecodeOptions::default().with_ansi_codepage(args.codepage);
    if args.legacy_collate {
        options = options.with_collate_gate(CollateGate::TrueTypeOption);
    }

    let result = match args.kind {
        Kind::Ole => dump::<OleStream>(&data, &options),
        Kind::CompObj => dump::<CompObjStream>(&data, &options),
        Kind::Presentation => dump::<OlePresentationStream>(&data, &options),
        Kind::Native => dump::<OleNativeStream>(&data, &options),
        Kind::Embedded => dump::<EmbeddedObject>(&data, &options),
        Kind::Linked => dump::<LinkedObject>(&data, &options),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", args.input.display(), e);
            ExitCode::FAILURE
        },
    }
}
