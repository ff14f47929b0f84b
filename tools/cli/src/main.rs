//! kuzcrypt CLI - Password-based file encryption with Kuznyechik in CTR mode.
//!
//! Encrypts or decrypts exactly one file per invocation. The output is the
//! raw CTR-transformed byte stream of the input: no header, no stored salt
//! or IV, output length equal to input length. Decryption therefore needs
//! nothing but the same password.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use zeroize::Zeroizing;

use kuzcrypt_common::{resolve_output_path, Mode};
use kuzcrypt_crypto::{derive_key, CtrStream, KdfParams};

#[derive(Parser)]
#[command(name = "kuzcrypt")]
#[command(about = "Encrypt or decrypt a file with a password (Kuznyechik, CTR mode)")]
#[command(version)]
#[command(group(ArgGroup::new("mode").required(true).args(["encrypt", "decrypt"])))]
struct Cli {
    /// Encrypt the input file.
    #[arg(short = 'e', long)]
    encrypt: bool,

    /// Decrypt the input file.
    #[arg(short = 'd', long)]
    decrypt: bool,

    /// Input file.
    #[arg(short, long)]
    input: PathBuf,

    /// Password the key is derived from.
    #[arg(short, long)]
    password: String,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(cli, &KdfParams::interactive())
}

/// Perform one transform: resolve the output name, open the streams, derive
/// the key, and drive the CTR transform.
///
/// A failure after the output file has been created leaves the partial file
/// in place; the nonzero exit status is the signal that it is invalid.
fn run(cli: Cli, kdf_params: &KdfParams) -> Result<()> {
    let mode = if cli.encrypt {
        Mode::Encrypt
    } else {
        Mode::Decrypt
    };

    let password = Zeroizing::new(cli.password.into_bytes());
    let output_path = resolve_output_path(&cli.input, mode);

    let input = File::open(&cli.input)
        .with_context(|| format!("Cannot open input file '{}'", cli.input.display()))?;
    let output = File::create(&output_path)
        .with_context(|| format!("Cannot create output file '{}'", output_path.display()))?;

    let key = derive_key(&password, kdf_params)?;

    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let bytes = CtrStream::new(&key).transform(&mut reader, &mut writer)?;

    let verb = match mode {
        Mode::Encrypt => "Encrypted",
        Mode::Decrypt => "Decrypted",
    };
    info!(
        "{} {} bytes: '{}' -> '{}'",
        verb,
        bytes,
        cli.input.display(),
        output_path.display()
    );

    Ok(())
}
