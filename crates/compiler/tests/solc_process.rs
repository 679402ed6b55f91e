use compiler::SolcCompiler;
use generator::{CompileError, CompileRequest, ContractCompiler, ImportRemapping, SolcVersion};
use pretty_assertions::assert_eq;

fn remapping(text: &str) -> ImportRemapping {
    text.parse().expect("valid remapping")
}

#[test]
fn arguments_without_remappings_read_stdin() {
    let request = CompileRequest::new("contract A {}", SolcVersion::new(0, 8, 4), vec![]);
    assert_eq!(
        SolcCompiler::arguments(&request),
        vec!["--combined-json", "abi,bin-runtime", "-"]
    );
}

#[test]
fn remappings_precede_options_and_are_allowed_paths() {
    let request = CompileRequest::new(
        "contract A {}",
        SolcVersion::new(0, 8, 4),
        vec![
            remapping("@openzeppelin=/opt/node_modules/@openzeppelin"),
            remapping("@hvym=/srv/hvym"),
        ],
    );
    assert_eq!(
        SolcCompiler::arguments(&request),
        vec![
            "@openzeppelin=/opt/node_modules/@openzeppelin",
            "@hvym=/srv/hvym",
            "--combined-json",
            "abi,bin-runtime",
            "--allow-paths",
            "/opt/node_modules/@openzeppelin,/srv/hvym",
            "-",
        ]
    );
}

#[test]
fn default_binary_is_resolved_through_path() {
    assert_eq!(SolcCompiler::default().binary().to_str(), Some("solc"));
}

#[tokio::test]
async fn missing_executable_is_reported_as_not_installed() {
    let compiler = SolcCompiler::new("/nonexistent/hvyc-test/solc");

    let err = compiler.version().await.expect_err("no such binary");
    assert_eq!(
        err,
        CompileError::NotInstalled {
            binary: "/nonexistent/hvyc-test/solc".to_string()
        }
    );

    let request = CompileRequest::new("contract A {}", SolcVersion::new(0, 8, 4), vec![]);
    let err = compiler.compile(&request).await.expect_err("no such binary");
    assert!(matches!(err, CompileError::NotInstalled { .. }));
}
