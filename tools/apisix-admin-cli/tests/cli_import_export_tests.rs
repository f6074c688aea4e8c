mod common;

use assert_cmd::prelude::*; // assertion traits for std::process::Command
use common::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cli(config_path: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("apisix-admin"));
    cmd.env("APISIX_ADMIN_CONFIG_PATH", config_path)
        .env_remove("APISIX_ADMIN_KEY")
        .env_remove("APISIX_ADMIN_LOG");
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_import_uploads_file_and_prints_result() -> anyhow::Result<()> {
    let (base, mock) = start_mock_admin().await?;
    let tmp = TempDir::new()?;
    let cfg_path = write_cli_config(&tmp, &base, Some(ADMIN_KEY)).await?;

    let yaml_path = tmp.path().join("apisix.yaml");
    tokio::fs::write(&yaml_path, "routes:\n  - uri: /hello\n").await?;

    cli(&cfg_path)
        .arg("import")
        .arg(yaml_path.as_os_str())
        .assert()
        .success()
        .stdout(predicate::str::contains("Import completed"))
        .stdout(predicate::str::contains(format!("Last import: {IMPORTED_AT}")))
        .stderr(predicate::str::contains("[OK] Import successful: ok"));

    let imports = mock.imports();
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].body, "routes:\n  - uri: /hello\n");
    assert_eq!(imports[0].content_type.as_deref(), Some("application/x-yaml"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_import_failure_exits_non_zero() -> anyhow::Result<()> {
    let (base, _mock) = start_mock_admin().await?;
    let tmp = TempDir::new()?;
    let cfg_path = write_cli_config(&tmp, &base, Some(ADMIN_KEY)).await?;

    let yaml_path = tmp.path().join("broken.yml");
    tokio::fs::write(&yaml_path, "invalid: [").await?;

    cli(&cfg_path)
        .arg("import")
        .arg(yaml_path.as_os_str())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[ERROR] Import failed: bad yaml"))
        .stderr(predicate::str::contains("Import command failed: bad yaml"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_import_rejects_other_extensions() -> anyhow::Result<()> {
    let (base, mock) = start_mock_admin().await?;
    let tmp = TempDir::new()?;
    let cfg_path = write_cli_config(&tmp, &base, Some(ADMIN_KEY)).await?;

    let json_path = tmp.path().join("apisix.json");
    tokio::fs::write(&json_path, "{}").await?;

    cli(&cfg_path)
        .arg("import")
        .arg(json_path.as_os_str())
        .assert()
        .failure();
    assert!(mock.imports().is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_export_writes_timestamped_file() -> anyhow::Result<()> {
    let (base, _mock) = start_mock_admin().await?;
    let tmp = TempDir::new()?;
    let cfg_path = write_cli_config(&tmp, &base, Some(ADMIN_KEY)).await?;
    let out_dir = tmp.path().join("exports");

    cli(&cfg_path)
        .arg("export")
        .arg("-d")
        .arg(out_dir.as_os_str())
        .assert()
        .success()
        .stderr(predicate::str::contains("[INFO] Export successful"));

    let files: Vec<_> = std::fs::read_dir(&out_dir)?
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files.len(), 1);
    let name = &files[0];
    let stamp = name
        .strip_prefix("apisix-config_")
        .and_then(|s| s.strip_suffix(".yaml"))
        .expect("export file name");
    assert!(stamp.parse::<i64>().is_ok());
    assert_eq!(
        tokio::fs::read_to_string(out_dir.join(name)).await?,
        EXPORT_BODY
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_export_with_wrong_key_reports_status() -> anyhow::Result<()> {
    let (base, mock) = start_mock_admin().await?;
    let tmp = TempDir::new()?;
    let cfg_path = write_cli_config(&tmp, &base, Some(ADMIN_KEY)).await?;
    let out_dir = tmp.path().join("exports");

    cli(&cfg_path)
        .arg("export")
        .arg("-d")
        .arg(out_dir.as_os_str())
        .arg("-k")
        .arg("wrong")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Export failed: 403"));

    assert!(!out_dir.exists() || std::fs::read_dir(&out_dir)?.next().is_none());
    assert!(
        mock.requests()
            .iter()
            .all(|r| r.api_key.as_deref() == Some("wrong"))
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_last_import_prints_date() -> anyhow::Result<()> {
    let (base, _mock) = start_mock_admin().await?;
    let tmp = TempDir::new()?;
    let cfg_path = write_cli_config(&tmp, &base, Some(ADMIN_KEY)).await?;

    cli(&cfg_path)
        .arg("last-import")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Last import: {LAST_IMPORT}")));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_last_import_tolerates_unreachable_server() -> anyhow::Result<()> {
    let tmp = TempDir::new()?;
    let cfg_path = write_cli_config(&tmp, "http://127.0.0.1:1", Some(ADMIN_KEY)).await?;

    cli(&cfg_path)
        .arg("last-import")
        .assert()
        .success()
        .stdout(predicate::str::contains("No import recorded"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_panel_renders_json() -> anyhow::Result<()> {
    let (base, _mock) = start_mock_admin().await?;
    let tmp = TempDir::new()?;
    let cfg_path = write_cli_config(&tmp, &base, Some(ADMIN_KEY)).await?;

    let output = cli(&cfg_path).arg("panel").arg("-o").arg("json").output()?;
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(view["title"], "Import / Export");
    assert_eq!(view["last_import"], format!("Last import: {LAST_IMPORT}"));
    assert_eq!(view["buttons"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_context_set_then_select() -> anyhow::Result<()> {
    let tmp = TempDir::new()?;
    let cfg_path = write_cli_config(&tmp, "http://127.0.0.1:9180", None).await?;

    cli(&cfg_path)
        .args(["context", "set", "prod", "--admin-url", "https://gw.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ctx:'prod' updated successfully"));

    cli(&cfg_path)
        .args(["context", "select", "prod"])
        .assert()
        .success();

    cli(&cfg_path)
        .args(["context", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* prod"));

    cli(&cfg_path)
        .args(["context", "select", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
    Ok(())
}
