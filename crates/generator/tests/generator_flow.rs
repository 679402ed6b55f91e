use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use generator::{
    CompileError, CompileRequest, CompiledArtifacts, CompiledContract, CompilerSettings,
    ContractCompiler, ContractGenerator, ContractParams, ContractRenderData, ContractVariant,
    GeneratorError, ImportRemapping, MintAccess, OutputSelection, RenderError, SolcVersion,
    TemplateName, TemplateRenderer,
};
use serde_json::json;
use tracing::span::{Attributes, Id};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

// ---------------------------------------------------------------------------
// In-memory capabilities
// ---------------------------------------------------------------------------

/// Renders the data object as `contract <id> { <props> }`.
struct LineRenderer;

impl TemplateRenderer for LineRenderer {
    fn render(
        &self,
        template: &TemplateName,
        data: &ContractRenderData,
    ) -> Result<String, RenderError> {
        if template.as_str() != "known" {
            return Err(RenderError::TemplateNotFound {
                name: template.clone(),
            });
        }
        Ok(format!(
            "{}contract HVY{}_{} is ERC721,{}Ownable {{ {} }}",
            data.burnable_import,
            data.abrev,
            data.name,
            data.burnable_tag,
            data.int_props.join(" ")
        ))
    }
}

/// Records the last request and returns a canned result.
struct RecordingCompiler {
    last: Mutex<Option<CompileRequest>>,
    result: Result<CompiledArtifacts, CompileError>,
    version: SolcVersion,
}

impl RecordingCompiler {
    fn returning(result: Result<CompiledArtifacts, CompileError>) -> Self {
        Self {
            last: Mutex::new(None),
            result,
            version: SolcVersion::new(0, 8, 4),
        }
    }
}

#[async_trait]
impl ContractCompiler for RecordingCompiler {
    async fn compile(&self, request: &CompileRequest) -> Result<CompiledArtifacts, CompileError> {
        *self.last.lock().expect("lock") = Some(request.clone());
        self.result.clone()
    }

    async fn version(&self) -> Result<SolcVersion, CompileError> {
        Ok(self.version)
    }
}

/// Records the name of every span opened, with whether it carries a run id.
#[derive(Clone, Default)]
struct SpanLog(Arc<Mutex<Vec<(&'static str, bool)>>>);

impl<S: Subscriber> Layer<S> for SpanLog {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let metadata = attrs.metadata();
        let has_run_id = metadata.fields().field("run_id").is_some();
        self.0
            .lock()
            .expect("lock")
            .push((metadata.name(), has_run_id));
    }
}

impl SpanLog {
    fn spans(&self) -> Vec<(&'static str, bool)> {
        self.0.lock().expect("lock").clone()
    }
}

fn artifacts_for(key: &str) -> CompiledArtifacts {
    let mut artifacts = CompiledArtifacts::new();
    artifacts.insert(
        key,
        CompiledContract {
            abi: json!([{ "type": "function", "name": "mint" }]),
            bin_runtime: "608060405234801561001057600080fd5b50".into(),
        },
    );
    artifacts
}

fn settings() -> CompilerSettings {
    CompilerSettings {
        version: SolcVersion::new(0, 8, 4),
        remappings: vec!["@openzeppelin=/opt/node_modules/@openzeppelin"
            .parse::<ImportRemapping>()
            .expect("remapping")],
    }
}

fn generator(compiler: RecordingCompiler) -> ContractGenerator<LineRenderer, RecordingCompiler> {
    ContractGenerator::new(
        LineRenderer,
        compiler,
        TemplateName::new("known").expect("template name"),
        settings(),
    )
}

fn params() -> ContractParams {
    ContractParams::parse(
        "TEST",
        "0.2",
        "0.25",
        "10",
        &["intelligence", "strength"],
        ContractVariant::character(MintAccess::OwnerOnly),
    )
    .expect("valid params")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn render_produces_source_and_identifier() {
    let g = generator(RecordingCompiler::returning(Ok(CompiledArtifacts::new())));
    let rendered = g.render(params()).expect("render");

    assert_eq!(rendered.contract_identifier, "HVYC_TEST");
    assert!(rendered.source.contains("contract HVYC_TEST is ERC721, ERC721Burnable, Ownable"));
    assert!(rendered.source.contains("uint256 intelligence; uint256 strength;"));
    assert_eq!(rendered.data.int_push, vec!["intelligence", "strength"]);
}

#[test]
fn rendering_is_repeatable() {
    let g = generator(RecordingCompiler::returning(Ok(CompiledArtifacts::new())));
    let a = g.render(params()).expect("first render");
    let b = g.render(params()).expect("second render");
    assert_eq!(a.source, b.source);
    assert_ne!(a.run_id, b.run_id);
}

#[test]
fn render_errors_pass_through_unchanged() {
    let g = ContractGenerator::new(
        LineRenderer,
        RecordingCompiler::returning(Ok(CompiledArtifacts::new())),
        TemplateName::new("missing").expect("template name"),
        settings(),
    );
    let err = g.render(params()).expect_err("unknown template");
    match err {
        GeneratorError::Render(RenderError::TemplateNotFound { name }) => {
            assert_eq!(name.as_str(), "missing");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn generate_compiles_with_configured_settings() {
    let g = generator(RecordingCompiler::returning(Ok(artifacts_for("<stdin>:HVYC_TEST"))));
    let generated = g.generate(params()).await.expect("generate");

    let contract = generated
        .artifacts
        .find("HVYC_TEST")
        .expect("generated contract present");
    assert_eq!(contract.abi[0]["name"], "mint");

    let last = g_last_request(&g);
    assert_eq!(last.source, generated.rendered.source);
    assert_eq!(last.solc_version, SolcVersion::new(0, 8, 4));
    assert_eq!(last.remappings, settings().remappings);
    assert_eq!(
        last.outputs,
        vec![OutputSelection::Abi, OutputSelection::BinRuntime]
    );
}

#[tokio::test]
async fn compile_errors_pass_through_unchanged() {
    let failure = CompileError::Compilation {
        stderr: "ParserError: Expected ';' but got '}'".into(),
    };
    let g = generator(RecordingCompiler::returning(Err(failure.clone())));
    let err = g.generate(params()).await.expect_err("compilation fails");

    assert_eq!(err.to_string(), failure.to_string());
    assert!(matches!(err, GeneratorError::Compile(e) if e == failure));
}

#[tokio::test]
async fn missing_generated_contract_is_reported() {
    let g = generator(RecordingCompiler::returning(Ok(artifacts_for(
        "<stdin>:SomethingElse",
    ))));
    let err = g.generate(params()).await.expect_err("contract missing");
    assert!(matches!(
        err,
        GeneratorError::Compile(CompileError::ContractMissing { ref identifier })
            if identifier == "HVYC_TEST"
    ));
}

#[tokio::test]
async fn check_compiler_accepts_matching_version() {
    let g = generator(RecordingCompiler::returning(Ok(CompiledArtifacts::new())));
    assert_eq!(
        g.check_compiler().await.expect("version ok"),
        SolcVersion::new(0, 8, 4)
    );
}

#[tokio::test]
async fn check_compiler_rejects_other_versions() {
    let mut compiler = RecordingCompiler::returning(Ok(CompiledArtifacts::new()));
    compiler.version = SolcVersion::new(0, 8, 20);
    let g = generator(compiler);

    let err = g.check_compiler().await.expect_err("mismatch");
    assert!(matches!(
        err,
        GeneratorError::Compile(CompileError::VersionMismatch { expected, found })
            if expected == SolcVersion::new(0, 8, 4) && found == SolcVersion::new(0, 8, 20)
    ));
}

#[test]
fn render_opens_a_generate_contract_span() {
    let log = SpanLog::default();
    let subscriber = Registry::default().with(log.clone());
    let g = generator(RecordingCompiler::returning(Ok(CompiledArtifacts::new())));

    tracing::subscriber::with_default(subscriber, || g.render(params())).expect("render");

    assert_eq!(log.spans(), vec![("generate_contract", true)]);
}

#[tokio::test]
async fn generate_opens_a_generate_contract_span() {
    let log = SpanLog::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(log.clone()));
    let g = generator(RecordingCompiler::returning(Ok(artifacts_for("<stdin>:HVYC_TEST"))));

    g.generate(params()).await.expect("generate");

    assert_eq!(log.spans(), vec![("generate_contract", true)]);
}

fn g_last_request(g: &ContractGenerator<LineRenderer, RecordingCompiler>) -> CompileRequest {
    g.compiler()
        .last
        .lock()
        .expect("lock")
        .clone()
        .expect("compiler was called")
}
