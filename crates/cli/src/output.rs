//! Writing generated source and compiled artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use generator::{
    CompileError, CompilerSettings, ContractVariant, GeneratedContract, GenerationRunId,
    SolcVersion, TemplateName, Timestamp,
};
use serde::Serialize;
use tracing::info;

/// Provenance record written next to the artifacts.
#[derive(Debug, Serialize)]
pub(crate) struct BuildManifest {
    pub run_id: GenerationRunId,
    pub generated_at: Timestamp,
    pub contract: String,
    pub variant: ContractVariant,
    pub solc_version: SolcVersion,
    pub template: TemplateName,
    pub files: Vec<String>,
}

pub(crate) fn write_source(path: &Path, source: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, source).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "Wrote contract source");
    Ok(())
}

/// Writes `<Id>.sol`, `<Id>.abi.json`, `<Id>.bin-runtime` and `manifest.json`
/// into `out_dir`, returning the paths written.
pub(crate) fn write_artifacts(
    out_dir: &Path,
    generated: &GeneratedContract,
    variant: ContractVariant,
    template: &TemplateName,
    settings: &CompilerSettings,
) -> anyhow::Result<Vec<PathBuf>> {
    let id = &generated.rendered.contract_identifier;
    let contract = generated
        .artifacts
        .find(id)
        .ok_or_else(|| CompileError::ContractMissing {
            identifier: id.clone(),
        })?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating directory {}", out_dir.display()))?;

    let files = [
        (format!("{id}.sol"), generated.rendered.source.clone()),
        (
            format!("{id}.abi.json"),
            serde_json::to_string_pretty(&contract.abi)?,
        ),
        (format!("{id}.bin-runtime"), contract.bin_runtime.clone()),
    ];

    let mut written = Vec::with_capacity(files.len() + 1);
    for (name, contents) in &files {
        let path = out_dir.join(name);
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }

    let manifest = BuildManifest {
        run_id: generated.rendered.run_id,
        generated_at: Timestamp::now(),
        contract: id.clone(),
        variant,
        solc_version: settings.version,
        template: template.clone(),
        files: files.iter().map(|(name, _)| name.clone()).collect(),
    };
    let path = out_dir.join("manifest.json");
    fs::write(&path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("writing {}", path.display()))?;
    written.push(path);

    info!(dir = %out_dir.display(), files = written.len(), "Wrote compiled artifacts");
    Ok(written)
}
