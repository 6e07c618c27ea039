use std::fs;

use clap::Parser;
use tempfile::tempdir;

use fathom_sync::config::{Cli, Config};
use fathom_sync::run;

fn config_for(args: &[&str]) -> Config {
    let cli = Cli::try_parse_from(std::iter::once("fathom-sync").chain(args.iter().copied()))
        .expect("arguments should parse");
    Config::from_cli(cli).expect("config should build")
}

#[tokio::test]
async fn test_run_without_credentials_writes_placeholders() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    let cwd = dir.path().to_str().unwrap();

    let config = config_for(&["custom/out", "--cwd", cwd, "--site-id", "", "--api-key", ""]);
    let report = run(&config).await.unwrap();

    assert!(report.placeholder);
    assert_eq!(report.output_dir, dir.path().join("src").join("custom").join("out"));
    for file in ["types.ts", "mappings.ts", "utilities.ts"] {
        assert!(report.output_dir.join(file).is_file(), "{file} missing");
    }
    assert!(report.message().starts_with("Placeholder artifacts generated"));
}

#[tokio::test]
async fn test_run_with_credentials_requires_configuration() {
    let dir = tempdir().unwrap();
    let cwd = dir.path().to_str().unwrap();

    let config = config_for(&[
        "--cwd",
        cwd,
        "--site-id",
        "ABCDEFG",
        "--api-key",
        "secret",
        "--api-url",
        "http://127.0.0.1:9",
    ]);
    let err = run(&config).await.unwrap_err();

    assert!(err.to_string().contains("configuration"), "got {err}");
}
