//! # AAS Ingest CLI
//!
//! Reads AAS sources in any supported format and prints the canonical
//! model as JSON. Also exposes the identifier helpers.

use aas_ingest_cli::{
    load_environment, load_fragment, render, render_fragment, resolve_format, IngestConfig,
    SourceFormat,
};
use aas_ingest_reader::{create_id_short, decode_id_base64url, encode_id_base64url};
use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let config = IngestConfig::from_env()?;

    match args[1].as_str() {
        command @ ("read" | "fragment") => {
            let (format, path) = match &args[2..] {
                [path] => (None, path),
                [format, path] => (Some(format.parse::<SourceFormat>()?), path),
                _ => {
                    eprintln!("Usage: aas-ingest {command} [<format>] <file>");
                    std::process::exit(1);
                }
            };
            let path = Path::new(path);
            let format = resolve_format(format, &config, path)?;
            tracing::debug!(%format, path = %path.display(), "Reading source");

            let output = if command == "read" {
                render(&load_environment(path, format, &config)?, config.pretty)?
            } else {
                render_fragment(&load_fragment(path, format, &config)?, config.pretty)?
            };
            println!("{output}");
        }
        "encode" => {
            if args.len() < 3 {
                eprintln!("Usage: aas-ingest encode <identifier>");
                std::process::exit(1);
            }
            println!("{}", encode_id_base64url(&args[2]));
        }
        "decode" => {
            if args.len() < 3 {
                eprintln!("Usage: aas-ingest decode <encoded>");
                std::process::exit(1);
            }
            let decoded = decode_id_base64url(&args[2]).context("Failed to decode")?;
            println!("{decoded}");
        }
        "id-short" => {
            if args.len() < 3 {
                eprintln!("Usage: aas-ingest id-short <identifier>");
                std::process::exit(1);
            }
            println!("{}", create_id_short(&args[2]));
        }
        "help" | "--help" | "-h" => {
            print_help();
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_help() {
    let formats: Vec<&str> = SourceFormat::ALL.iter().map(|f| f.as_str()).collect();
    println!(
        r#"AAS Ingest CLI

USAGE:
    aas-ingest <COMMAND> [OPTIONS]

COMMANDS:
    read [<format>] <file>      Read an environment and print it as canonical JSON
    fragment [<format>] <file>  Read a single submodel or element
    encode <id>                 Encode an AAS identifier to base64url (no padding)
    decode <encoded>            Decode a base64url-encoded identifier
    id-short <id>               Derive an idShort from an identifier
    help                        Show this help message

FORMATS:
    {}

ENVIRONMENT:
    AAS_INGEST_MAX_DEPTH   Maximum nesting depth (default 64)
    AAS_INGEST_PRETTY      Pretty-print output (default true)
    AAS_INGEST_FORMAT      Format used when none is given
    RUST_LOG               Log filter (default info)

EXAMPLES:
    aas-ingest read json environment.json
    aas-ingest fragment opcua speed-node.json
    aas-ingest encode "urn:example:aas:asset1"
"#,
        formats.join(", ")
    );
}
