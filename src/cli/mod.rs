//! CLI module for the hash engine

pub mod commands;

pub use commands::{
    cmd_config_init, cmd_decode, cmd_digest, cmd_encode, cmd_merkle_proof, cmd_merkle_root,
    collect_hashes, init_app, print_error, read_input, AppState, CliResult, DigestKind,
};
