//! Hash Engine CLI Application
//!
//! A command-line interface for hashing data and computing Merkle roots.

use clap::{Args, Parser, Subcommand};
use hash_engine::cli::{self, AppState, DigestKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hashengine")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "SHA-256, RIPEMD-160, Hash160 and Merkle-root hashing", long_about = None)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON envelopes
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Text to hash (or hex with --hex, or a path with --file)
    input: String,

    /// Treat the input as hex-encoded bytes
    #[arg(long, conflicts_with = "file")]
    hex: bool,

    /// Treat the input as a file path and hash its contents
    #[arg(long)]
    file: bool,
}

#[derive(Args)]
struct HashListArgs {
    /// Hex hashes, in order
    hashes: Vec<String>,

    /// Read additional hashes from a file, one per line
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// SHA-256 digest
    Sha256(InputArgs),

    /// Double SHA-256 digest
    Sha256d(InputArgs),

    /// RIPEMD-160 digest
    Ripemd160(InputArgs),

    /// RIPEMD-160 of SHA-256 (address-style hash)
    Hash160(InputArgs),

    /// Merkle root of a list of hashes
    MerkleRoot(HashListArgs),

    /// Inclusion proof for one leaf of a Merkle tree
    MerkleProof {
        /// Zero-based leaf index
        index: usize,

        #[command(flatten)]
        list: HashListArgs,
    },

    /// Hex-encode text
    Encode {
        /// Text to encode
        text: String,
    },

    /// Decode hex
    Decode {
        /// Hex string to decode
        hex: String,
    },

    /// Configuration file operations
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the default configuration
    Init {
        /// Where to write the file
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn run(cli: &Cli) -> cli::CliResult<()> {
    let config = cli::init_app(cli.config.as_deref())?;
    let state = AppState::new(&config, cli.json);

    match &cli.command {
        Commands::Sha256(args) => digest(&state, DigestKind::Sha256, args),
        Commands::Sha256d(args) => digest(&state, DigestKind::Sha256d, args),
        Commands::Ripemd160(args) => digest(&state, DigestKind::Ripemd160, args),
        Commands::Hash160(args) => digest(&state, DigestKind::Hash160, args),
        Commands::MerkleRoot(list) => {
            cli::cmd_merkle_root(&state, &list.hashes, list.file.as_deref())
        }
        Commands::MerkleProof { index, list } => {
            cli::cmd_merkle_proof(&state, *index, &list.hashes, list.file.as_deref())
        }
        Commands::Encode { text } => cli::cmd_encode(&state, text),
        Commands::Decode { hex } => cli::cmd_decode(&state, hex),
        Commands::Config {
            action: ConfigCommands::Init { path, force },
        } => cli::cmd_config_init(path, *force),
    }
}

fn digest(state: &AppState, kind: DigestKind, args: &InputArgs) -> cli::CliResult<()> {
    cli::cmd_digest(state, kind, &args.input, args.hex, args.file)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        log::error!("Command failed: {}", e);
        if cli.json {
            cli::print_error(e.as_ref());
            std::process::exit(1);
        }
        return Err(e);
    }

    Ok(())
}
