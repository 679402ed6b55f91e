//! Parsing of `solc` command-line output.

use std::collections::BTreeMap;

use generator::{CompileError, CompiledArtifacts, CompiledContract, SolcVersion};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct CombinedJson {
    contracts: BTreeMap<String, CombinedEntry>,
}

#[derive(Debug, Deserialize)]
struct CombinedEntry {
    #[serde(default)]
    abi: Option<Value>,
    #[serde(rename = "bin-runtime", default)]
    bin_runtime: Option<String>,
}

/// Parses the output of `solc --combined-json abi,bin-runtime`.
///
/// Releases before 0.8.10 emit each ABI as a JSON-encoded string; later
/// releases emit it inline. Both forms are normalised to a JSON value.
///
/// # Errors
///
/// Returns [`CompileError::InvalidOutput`] when the document is not combined
/// JSON or an entry lacks an ABI.
pub fn parse_combined_json(stdout: &str) -> Result<CompiledArtifacts, CompileError> {
    let combined: CombinedJson =
        serde_json::from_str(stdout).map_err(|e| CompileError::InvalidOutput {
            message: format!("combined JSON: {e}"),
        })?;

    let mut artifacts = CompiledArtifacts::new();
    for (key, entry) in combined.contracts {
        let abi = match entry.abi {
            Some(Value::String(encoded)) => {
                serde_json::from_str(&encoded).map_err(|e| CompileError::InvalidOutput {
                    message: format!("ABI of '{key}': {e}"),
                })?
            }
            Some(value) => value,
            None => {
                return Err(CompileError::InvalidOutput {
                    message: format!("no ABI for '{key}'"),
                })
            }
        };
        let bin_runtime = entry.bin_runtime.unwrap_or_default();
        artifacts.insert(key, CompiledContract { abi, bin_runtime });
    }
    Ok(artifacts)
}

/// Extracts the release version from `solc --version` output.
///
/// The relevant line reads `Version: 0.8.4+commit.c7e474f2.Linux.g++`.
///
/// # Errors
///
/// Returns [`CompileError::InvalidOutput`] when no parsable version line is
/// present.
pub fn parse_version_output(stdout: &str) -> Result<SolcVersion, CompileError> {
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("Version:"))
        .ok_or_else(|| CompileError::InvalidOutput {
            message: "no 'Version:' line in solc --version output".to_string(),
        })?
        .trim()
        .parse()
        .map_err(|message| CompileError::InvalidOutput { message })
}
