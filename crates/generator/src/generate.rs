//! Orchestration of one contract-generation request.
//!
//! [`ContractGenerator`] sequences shaping, rendering and compilation. It owns
//! no domain rules of its own: shaping lives in [`crate::shaping`], and the two
//! external capabilities are reached only through [`crate::ports`].

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};

use crate::shaping::build_contract_data;
use crate::{
    CompileError, CompileRequest, CompiledArtifacts, ContractCompiler, ContractParams,
    ContractRenderData, GenerationRunId, GeneratorError, ImportRemapping, SolcVersion,
    TemplateName, TemplateRenderer,
};

/// Compiler settings applied to every compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSettings {
    /// Required compiler version.
    pub version: SolcVersion,
    /// Import remappings (e.g. `@openzeppelin=<node_modules path>`).
    pub remappings: Vec<ImportRemapping>,
}

/// Rendered source for one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContract {
    /// Identifies the request that produced this source.
    pub run_id: GenerationRunId,
    /// Contract identifier declared by the source (`HVY<abrev>_<name>`).
    pub contract_identifier: String,
    /// Solidity source text.
    pub source: String,
    /// Data object the source was rendered from.
    pub data: ContractRenderData,
}

/// Rendered source together with its compiled artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContract {
    /// Rendered source.
    pub rendered: RenderedContract,
    /// Every contract emitted by the compiler, including imported ones.
    pub artifacts: CompiledArtifacts,
}

/// Drives rendering and compilation for contract-generation requests.
pub struct ContractGenerator<R, C> {
    renderer: R,
    compiler: C,
    template: TemplateName,
    settings: CompilerSettings,
}

impl<R, C> ContractGenerator<R, C>
where
    R: TemplateRenderer,
    C: ContractCompiler,
{
    /// Creates a generator from its two capabilities and configuration.
    pub fn new(
        renderer: R,
        compiler: C,
        template: TemplateName,
        settings: CompilerSettings,
    ) -> Self {
        Self {
            renderer,
            compiler,
            template,
            settings,
        }
    }

    /// The compilation capability.
    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Template used for every request.
    pub fn template(&self) -> &TemplateName {
        &self.template
    }

    /// Compiler settings used for every compilation.
    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// Shapes `params` and renders them into Solidity source.
    ///
    /// Opens the same `generate_contract` span as [`Self::generate`], without
    /// the compiler version.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Render`] with the renderer's error unchanged.
    pub fn render(&self, params: ContractParams) -> Result<RenderedContract, GeneratorError> {
        let run_id = GenerationRunId::new_random();
        let span = info_span!(
            "generate_contract",
            %run_id,
            contract = %params.name,
            variant = %params.variant,
        );
        let _guard = span.enter();
        self.render_with_id(run_id, &params)
    }

    /// Renders `params` and compiles the result.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Render`] or [`GeneratorError::Compile`] with
    /// the underlying error unchanged. A successful compilation that does not
    /// contain the generated contract yields [`CompileError::ContractMissing`].
    pub async fn generate(
        &self,
        params: ContractParams,
    ) -> Result<GeneratedContract, GeneratorError> {
        let run_id = GenerationRunId::new_random();
        let span = info_span!(
            "generate_contract",
            %run_id,
            contract = %params.name,
            variant = %params.variant,
            solc = %self.settings.version,
        );

        async move {
            let rendered = self.render_with_id(run_id, &params)?;

            let request = CompileRequest::new(
                rendered.source.clone(),
                self.settings.version,
                self.settings.remappings.clone(),
            );
            let artifacts = self.compiler.compile(&request).await?;

            if artifacts.find(&rendered.contract_identifier).is_none() {
                return Err(CompileError::ContractMissing {
                    identifier: rendered.contract_identifier.clone(),
                }
                .into());
            }

            info!(contracts = artifacts.len(), "Compiled contract");
            Ok(GeneratedContract {
                rendered,
                artifacts,
            })
        }
        .instrument(span)
        .await
    }

    /// Checks that the compiler reports the configured version.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::VersionMismatch`] when the versions differ, or
    /// whatever the compiler raised while reporting its version.
    pub async fn check_compiler(&self) -> Result<SolcVersion, GeneratorError> {
        let found = self.compiler.version().await?;
        if found != self.settings.version {
            return Err(CompileError::VersionMismatch {
                expected: self.settings.version,
                found,
            }
            .into());
        }
        info!(version = %found, "Compiler version verified");
        Ok(found)
    }

    fn render_with_id(
        &self,
        run_id: GenerationRunId,
        params: &ContractParams,
    ) -> Result<RenderedContract, GeneratorError> {
        let data = build_contract_data(params);
        let source = self.renderer.render(&self.template, &data)?;
        info!(
            template = %self.template,
            bytes = source.len(),
            "Rendered contract source"
        );
        Ok(RenderedContract {
            run_id,
            contract_identifier: params.contract_identifier(),
            source,
            data,
        })
    }
}
