use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;

use ndef_record::kinds::TextRecord;
use ndef_record::{
    HeaderFlags, Record, RecordKind, Resolver, SliceCursor, TypeNameFormat, decode_record_with,
    default_resolver, generic_resolver, registered_types,
};

/// Inspect and build single NDEF records
#[derive(Parser)]
#[command(name = "ndef-tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a hex-encoded record and print it as JSON
    Decode {
        hex: String,

        /// Re-encode and fail if the bytes differ
        #[arg(long)]
        check: bool,

        /// Skip the kind registry and keep the payload unstructured
        #[arg(long)]
        raw: bool,
    },

    /// Encode a Text record and print it as hex
    Text {
        text: String,

        #[arg(long, default_value = "en")]
        lang: String,

        #[arg(long)]
        utf16: bool,
    },

    /// Encode a URI record and print it as hex
    Uri { uri: String },

    /// Unpack a header byte (decimal or 0x-prefixed hex)
    Flags { byte: String },

    /// List the registered well-known and media types
    Kinds,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { hex, check, raw } => {
            let resolver: Resolver = if raw {
                generic_resolver
            } else {
                default_resolver
            };
            decode(&hex, check, resolver)
        }
        Commands::Text { text, lang, utf16 } => {
            let record = if utf16 {
                TextRecord::utf16(lang, text)
            } else {
                TextRecord::new(lang, text)
            };
            print_hex(&Record::from_kind(RecordKind::Text(record)))
        }
        Commands::Uri { uri } => print_hex(&Record::uri(&uri)),
        Commands::Flags { byte } => {
            let value = match byte.strip_prefix("0x") {
                Some(digits) => u32::from_str_radix(digits, 16),
                None => byte.parse(),
            }
            .with_context(|| format!("not a number: {}", byte))?;
            let flags = HeaderFlags::try_from(value)?;
            println!("{}", serde_json::to_string_pretty(&flags)?);
            Ok(())
        }
        Commands::Kinds => {
            for tnf in [TypeNameFormat::WellKnown, TypeNameFormat::Media] {
                for record_type in registered_types(tnf) {
                    println!("{}{}", tnf.prefix(), record_type);
                }
            }
            Ok(())
        }
    }
}

fn decode(input: &str, check: bool, resolver: Resolver) -> Result<()> {
    let bytes = hex::decode(input.trim()).context("input is not hex")?;
    let record = decode_record_with(&mut SliceCursor::new(&bytes), resolver)?;
    info!("decoded {} record", record.kind().name());

    if check {
        let encoded = record.to_bytes()?;
        // trailing bytes after the record are not part of it
        if !bytes.starts_with(&encoded) {
            bail!("re-encoding differs: {} != {}", hex::encode(&encoded), input.trim());
        }
    }

    println!("{}", serde_json::to_string_pretty(&record.summary())?);
    Ok(())
}

fn print_hex(record: &Record) -> Result<()> {
    let bytes = record.to_bytes()?;
    println!("{}", hex::encode_upper(bytes));
    Ok(())
}
