//! CLI commands for the hash engine
//!
//! Implements all command handlers for the CLI interface.

use crate::config::Config;
use crate::engine::HashEngine;
use crate::logging;
use crate::utils::json::{self, error_response, success_response};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Error code reported in JSON error envelopes
pub const CLI_ERROR_CODE: i64 = 1;

/// Application state
pub struct AppState {
    pub engine: HashEngine,
    pub json_output: bool,
}

impl AppState {
    /// Initialize application state from configuration
    pub fn new(config: &Config, json_output: bool) -> Self {
        Self {
            engine: HashEngine::with_config(Default::default(), config.engine_config()),
            json_output,
        }
    }

    /// Print `data` as a success envelope, or `plain` as text
    fn emit(&self, data: Value, plain: &str) -> CliResult<()> {
        if self.json_output {
            let response = success_response(data, "Success");
            println!("{}", json::to_pretty_string(&response, 2)?);
        } else {
            println!("{}", plain);
        }
        Ok(())
    }
}

/// Load the configuration (defaults without a path) and install the logger
pub fn init_app(config_path: Option<&Path>) -> CliResult<Config> {
    let config = match config_path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::new(),
    };

    logging::init_logger(&config.logging_config())?;
    if let Some(path) = config.config_file_path() {
        log::info!("Configuration loaded from {}", path.display());
    }
    Ok(config)
}

/// Digest selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestKind {
    Sha256,
    Sha256d,
    Ripemd160,
    Hash160,
}

impl DigestKind {
    pub fn name(&self) -> &'static str {
        match self {
            DigestKind::Sha256 => "sha256",
            DigestKind::Sha256d => "sha256d",
            DigestKind::Ripemd160 => "ripemd160",
            DigestKind::Hash160 => "hash160",
        }
    }

    pub fn compute(&self, engine: &HashEngine, data: &[u8]) -> CliResult<String> {
        let digest = match self {
            DigestKind::Sha256 => engine.sha256(data)?,
            DigestKind::Sha256d => engine.sha256d(data)?,
            DigestKind::Ripemd160 => engine.ripemd160(data)?,
            DigestKind::Hash160 => engine.hash160(data)?,
        };
        Ok(digest)
    }
}

/// Resolve a command input to bytes
///
/// `input` is text by default, hex with `hex`, or a file path with `file`.
pub fn read_input(engine: &HashEngine, input: &str, hex: bool, file: bool) -> CliResult<Vec<u8>> {
    if file {
        Ok(fs::read(input)?)
    } else if hex {
        Ok(engine.hex_to_bytes(input)?)
    } else {
        Ok(input.as_bytes().to_vec())
    }
}

/// Hashes from arguments, followed by one per non-blank line of `file`
pub fn collect_hashes(args: &[String], file: Option<&Path>) -> CliResult<Vec<String>> {
    let mut hashes = args.to_vec();
    if let Some(path) = file {
        let contents = fs::read_to_string(path)?;
        hashes.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    Ok(hashes)
}

/// Hash a single input
pub fn cmd_digest(
    state: &AppState,
    kind: DigestKind,
    input: &str,
    hex: bool,
    file: bool,
) -> CliResult<()> {
    let data = read_input(&state.engine, input, hex, file)?;
    let digest = kind.compute(&state.engine, &data)?;

    state.emit(
        json!({
            "algorithm": kind.name(),
            "input_bytes": data.len(),
            "digest": digest,
        }),
        &digest,
    )
}

/// Compute a merkle root
pub fn cmd_merkle_root(state: &AppState, args: &[String], file: Option<&Path>) -> CliResult<()> {
    let hashes = collect_hashes(args, file)?;
    let root = state.engine.merkle_root(&hashes)?;

    state.emit(
        json!({
            "leaves": hashes.len(),
            "root": root,
        }),
        &root,
    )
}

/// Print the inclusion proof for one leaf
pub fn cmd_merkle_proof(
    state: &AppState,
    index: usize,
    args: &[String],
    file: Option<&Path>,
) -> CliResult<()> {
    let hashes = collect_hashes(args, file)?;
    let tree = state.engine.merkle_tree(&hashes)?;
    let proof = tree.proof(index).ok_or_else(|| {
        format!(
            "Leaf index {} out of range for {} hashes",
            index,
            hashes.len()
        )
    })?;

    let mut plain = format!("root: {}\nleaf: {}", tree.root(), hashes[index]);
    for (sibling, is_left) in &proof.siblings {
        let side = if *is_left { "left " } else { "right" };
        plain.push_str(&format!("\n  {} {}", side, sibling));
    }

    state.emit(
        json!({
            "root": tree.root(),
            "leaf": hashes[index],
            "proof": proof,
        }),
        &plain,
    )
}

/// Hex-encode text
pub fn cmd_encode(state: &AppState, text: &str) -> CliResult<()> {
    let encoded = state.engine.bytes_to_hex(text.as_bytes());
    state.emit(json!({ "hex": encoded }), &encoded)
}

/// Decode hex, printing text when the bytes are UTF-8
pub fn cmd_decode(state: &AppState, hex_str: &str) -> CliResult<()> {
    let bytes = state.engine.hex_to_bytes(hex_str)?;
    let text = String::from_utf8(bytes.clone()).ok();
    let plain = text
        .clone()
        .unwrap_or_else(|| format!("{:?}", bytes));

    state.emit(json!({ "bytes": bytes, "text": text }), &plain)
}

/// Write the default configuration file
pub fn cmd_config_init(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    Config::new().save_to_file(Some(path))?;
    Config::load_from_file(path)?;
    println!("✅ Configuration written to {}", path.display());
    Ok(())
}

/// Print an error envelope for `--json` mode
pub fn print_error(err: &dyn std::error::Error) {
    let response = error_response(CLI_ERROR_CODE, "Command failed", Some(&err.to_string()));
    match json::to_pretty_string(&response, 2) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto;

    fn state() -> AppState {
        AppState::new(&Config::new(), false)
    }

    #[test]
    fn test_read_input_modes() {
        let state = state();
        assert_eq!(read_input(&state.engine, "abc", false, false).unwrap(), b"abc");
        assert_eq!(read_input(&state.engine, "6162", true, false).unwrap(), b"ab");
        assert!(read_input(&state.engine, "616", true, false).is_err());

        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("input.bin");
        fs::write(&path, [0u8, 1, 2]).unwrap();
        let path_str = path.to_str().unwrap();
        assert_eq!(read_input(&state.engine, path_str, false, true).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_collect_hashes_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("hashes.txt");
        fs::write(&path, "aa\n\n  bb  \ncc\n").unwrap();

        let hashes = collect_hashes(&["00".to_string()], Some(path.as_path())).unwrap();
        assert_eq!(hashes, vec!["00", "aa", "bb", "cc"]);
    }

    #[test]
    fn test_digest_kinds() {
        let state = state();
        let data = b"cli";
        assert_eq!(
            DigestKind::Sha256.compute(&state.engine, data).unwrap(),
            crypto::sha256(data).unwrap()
        );
        assert_eq!(
            DigestKind::Hash160.compute(&state.engine, data).unwrap(),
            crypto::hash160(data).unwrap()
        );
        assert_eq!(DigestKind::Ripemd160.name(), "ripemd160");
    }

    #[test]
    fn test_commands_succeed() {
        let state = state();
        let hashes = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(cmd_digest(&state, DigestKind::Sha256d, "abc", false, false).is_ok());
        assert!(cmd_merkle_root(&state, &hashes, None).is_ok());
        assert!(cmd_merkle_proof(&state, 2, &hashes, None).is_ok());
        assert!(cmd_merkle_proof(&state, 3, &hashes, None).is_err());
        assert!(cmd_encode(&state, "hi").is_ok());
        assert!(cmd_decode(&state, "6869").is_ok());
        assert!(cmd_decode(&state, "686").is_err());
    }

    #[test]
    fn test_init_app_reports_bad_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("absent.json");
        assert!(init_app(Some(missing.as_path())).is_err());

        let invalid = temp_dir.path().join("invalid.json");
        fs::write(&invalid, r#"{"merkle": {"max_leaves": 0}}"#).unwrap();
        assert!(init_app(Some(invalid.as_path())).is_err());

        let valid = temp_dir.path().join("valid.json");
        fs::write(&valid, r#"{"merkle": {"max_leaves": 16}}"#).unwrap();
        let config = init_app(Some(valid.as_path())).unwrap();
        assert_eq!(config.engine_config().max_merkle_leaves, Some(16));
        assert_eq!(init_app(None).unwrap().engine_config().max_merkle_leaves, None);
    }

    #[test]
    fn test_config_init() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        cmd_config_init(&path, false).unwrap();
        assert!(Config::load_from_file(&path).is_ok());
        assert!(cmd_config_init(&path, false).is_err());
        assert!(cmd_config_init(&path, true).is_ok());
    }
}
