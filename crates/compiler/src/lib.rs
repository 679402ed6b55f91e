//! HVYC Solidity compiler adapter.
//!
//! Implements the [`generator::ContractCompiler`] trait by driving the `solc`
//! executable: the rendered source is piped to `solc --combined-json` on
//! stdin and the JSON written to stdout is parsed into
//! [`generator::CompiledArtifacts`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Process spawning, argument construction, version
//! probing and output parsing all live here. The [`generator`] crate sees only
//! [`generator::ContractCompiler`].
//!
//! ## Toolchain
//!
//! Installing and switching `solc` releases is left to external tooling
//! (`solc-select`, `svm`, distribution packages). This adapter only checks
//! that the executable it was given reports the requested version, and
//! refuses to compile otherwise.

pub mod output;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use async_trait::async_trait;
use generator::{CompileError, CompileRequest, CompiledArtifacts, ContractCompiler, SolcVersion};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

pub use output::{parse_combined_json, parse_version_output};

/// Default executable name, resolved through `PATH`.
pub const DEFAULT_SOLC_BINARY: &str = "solc";

/// A [`ContractCompiler`] that shells out to a `solc` executable.
#[derive(Debug)]
pub struct SolcCompiler {
    binary: PathBuf,
    version: OnceCell<SolcVersion>,
}

impl SolcCompiler {
    /// Creates a compiler that runs `binary` (a name on `PATH` or a path).
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            version: OnceCell::new(),
        }
    }

    /// The executable this compiler runs.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Builds the `solc` argument list for `request`. The source itself is
    /// supplied on stdin (the trailing `-`).
    pub fn arguments(request: &CompileRequest) -> Vec<String> {
        let mut args: Vec<String> = request.remappings.iter().map(ToString::to_string).collect();

        let outputs: Vec<&str> = request.outputs.iter().map(|o| o.as_str()).collect();
        args.push("--combined-json".to_string());
        args.push(outputs.join(","));

        if !request.remappings.is_empty() {
            let allowed: Vec<&str> = request.remappings.iter().map(|r| r.target()).collect();
            args.push("--allow-paths".to_string());
            args.push(allowed.join(","));
        }

        args.push("-".to_string());
        args
    }

    async fn run(&self, args: &[String], stdin: Option<&str>) -> Result<Output, CompileError> {
        debug!(binary = %self.binary.display(), ?args, "Running solc");

        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(&e))?;

        // stdin is fed while stdout and stderr are drained, so neither side
        // blocks on a full pipe. The handle is dropped when the writer
        // finishes, which closes stdin and gives solc its end-of-input.
        let feed = child.stdin.take().zip(stdin);
        let writer = async move {
            match feed {
                Some((mut pipe, text)) => pipe.write_all(text.as_bytes()).await,
                None => Ok(()),
            }
        };
        let (written, output) = tokio::join!(writer, child.wait_with_output());
        let output = output.map_err(io_error)?;

        // solc may exit before consuming its input (bad arguments, for
        // example); its exit status and stderr then describe the failure.
        if let Err(err) = written {
            if err.kind() != ErrorKind::BrokenPipe {
                return Err(io_error(err));
            }
            debug!(status = %output.status, "solc closed stdin before reading the whole source");
        }

        Ok(output)
    }

    fn spawn_error(&self, err: &std::io::Error) -> CompileError {
        if err.kind() == ErrorKind::NotFound {
            CompileError::NotInstalled {
                binary: self.binary.display().to_string(),
            }
        } else {
            io_error(err)
        }
    }

    async fn installed_version(&self) -> Result<SolcVersion, CompileError> {
        self.version
            .get_or_try_init(|| async {
                let output = self.run(&["--version".to_string()], None).await?;
                if !output.status.success() {
                    return Err(CompileError::InvalidOutput {
                        message: String::from_utf8_lossy(&output.stderr).into_owned(),
                    });
                }
                parse_version_output(&String::from_utf8_lossy(&output.stdout))
            })
            .await
            .copied()
    }
}

impl Default for SolcCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_SOLC_BINARY)
    }
}

#[async_trait]
impl ContractCompiler for SolcCompiler {
    async fn compile(&self, request: &CompileRequest) -> Result<CompiledArtifacts, CompileError> {
        let found = self.installed_version().await?;
        if found != request.solc_version {
            return Err(CompileError::VersionMismatch {
                expected: request.solc_version,
                found,
            });
        }

        let args = Self::arguments(request);
        let output = self.run(&args, Some(&request.source)).await?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(CompileError::Compilation {
                stderr: stderr.into_owned(),
            });
        }
        if !stderr.trim().is_empty() {
            warn!(diagnostics = %stderr.trim(), "solc reported warnings");
        }

        let artifacts = parse_combined_json(&String::from_utf8_lossy(&output.stdout))?;
        if artifacts.is_empty() {
            return Err(CompileError::InvalidOutput {
                message: "solc reported success but emitted no contracts".to_string(),
            });
        }
        debug!(contracts = artifacts.len(), "Parsed solc output");
        Ok(artifacts)
    }

    async fn version(&self) -> Result<SolcVersion, CompileError> {
        self.installed_version().await
    }
}

fn io_error(err: impl std::fmt::Display) -> CompileError {
    CompileError::Io {
        message: err.to_string(),
    }
}
