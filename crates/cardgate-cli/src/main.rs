use std::path::PathBuf;

use anyhow::{bail, Context};
use cardgate_cli::commands::{card, keygen, verify};
use cardgate_core::types::IdentityLabel;
use cardgate_crypto::provider::KeyScheme;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "cardgate", about = "cardgate key and card tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scheme {
    Ed25519,
    RsaPkcs1Sha256,
}

impl From<Scheme> for KeyScheme {
    fn from(s: Scheme) -> Self {
        match s {
            Scheme::Ed25519 => Self::Ed25519,
            Scheme::RsaPkcs1Sha256 => Self::RsaPkcs1Sha256,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a signing key and print its trust file entry
    Keygen {
        #[arg(long, value_enum, default_value = "ed25519")]
        scheme: Scheme,
        #[arg(long)]
        label: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Wrap raw snapshot bytes in an unsigned card
    Wrap {
        snapshot: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Sign a card with a key file
    Sign {
        card: PathBuf,
        #[arg(long)]
        key: PathBuf,
    },
    /// Validate a card against a trust file
    Verify {
        card: PathBuf,
        #[arg(long)]
        trust: PathBuf,
    },
    /// Print a card's id
    Fingerprint { card: PathBuf },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Keygen { scheme, label, out } => {
            let label = IdentityLabel::new(&label).with_context(|| format!("label '{label}'"))?;
            println!("{}", keygen::run_keygen(scheme.into(), label, &out)?);
        }
        Commands::Wrap { snapshot, out } => {
            println!("{}", card::run_wrap(&snapshot, &out)?);
        }
        Commands::Sign { card: path, key } => {
            card::run_sign(&path, &key)?;
        }
        Commands::Verify { card: path, trust } => match verify::run_verify(&path, &trust)? {
            Ok(()) => println!("valid"),
            Err(e) => bail!("card rejected: {e}"),
        },
        Commands::Fingerprint { card: path } => {
            println!("{}", card::run_fingerprint(&path)?);
        }
    }
    Ok(())
}
