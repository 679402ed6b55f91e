//! Port traits for the two external capabilities the generator depends on.
//!
//! Infrastructure crates implement these; the generator never renders text or
//! spawns a compiler itself. Tests substitute in-memory implementations.

use async_trait::async_trait;

use crate::{
    CompileError, CompiledArtifacts, ContractRenderData, ImportRemapping, RenderError,
    SolcVersion, TemplateName,
};

/// Renders a named template against a [`ContractRenderData`].
///
/// Implementations must be deterministic: the same template and data always
/// produce byte-identical text.
pub trait TemplateRenderer: Send + Sync {
    /// Renders `template` with `data` bound to the root name `data`.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the template is unknown, malformed, or
    /// fails during evaluation.
    fn render(
        &self,
        template: &TemplateName,
        data: &ContractRenderData,
    ) -> Result<String, RenderError>;
}

// ---------------------------------------------------------------------------

/// Compiler outputs that can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputSelection {
    /// JSON ABI.
    Abi,
    /// Runtime bytecode.
    BinRuntime,
}

impl OutputSelection {
    /// Name of the output as the compiler spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputSelection::Abi => "abi",
            OutputSelection::BinRuntime => "bin-runtime",
        }
    }
}

/// One compilation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// Complete Solidity source text.
    pub source: String,
    /// Compiler version the source must be compiled with.
    pub solc_version: SolcVersion,
    /// Import remappings passed to the compiler.
    pub remappings: Vec<ImportRemapping>,
    /// Requested outputs.
    pub outputs: Vec<OutputSelection>,
}

impl CompileRequest {
    /// Creates a request for the ABI and runtime bytecode of `source`.
    pub fn new(
        source: impl Into<String>,
        solc_version: SolcVersion,
        remappings: Vec<ImportRemapping>,
    ) -> Self {
        Self {
            source: source.into(),
            solc_version,
            remappings,
            outputs: vec![OutputSelection::Abi, OutputSelection::BinRuntime],
        }
    }
}

/// Compiles Solidity source into ABI and bytecode.
#[async_trait]
pub trait ContractCompiler: Send + Sync {
    /// Compiles one source unit.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] for missing or mismatched toolchains,
    /// compiler diagnostics, and unreadable output.
    async fn compile(&self, request: &CompileRequest) -> Result<CompiledArtifacts, CompileError>;

    /// Reports the version of the underlying compiler.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when the compiler cannot be started or its
    /// version output cannot be parsed.
    async fn version(&self) -> Result<SolcVersion, CompileError>;
}
