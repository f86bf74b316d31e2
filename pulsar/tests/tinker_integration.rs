#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use pulsar::tinker::TinkerBridge;
use pulsar::{App, ChannelHost};
use pulsar_core::Settings;
use pulsar_runtime::ResolveContext;
use tempfile::TempDir;
use tokio::sync::mpsc;

// Writing a script and exec'ing it while another test forks can fail with
// ETXTBSY; serialize script creation and spawn.
static SPAWN_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

fn laravel_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("artisan"), "<?php\n").unwrap();
    temp
}

fn write_script(path: &Path, body: &str) -> PathBuf {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_path_buf()
}

fn vendor_php(project: &Path, body: &str) -> PathBuf {
    write_script(&project.join("vendor").join("bin").join("php"), body)
}

fn isolated_bridge() -> TinkerBridge {
    TinkerBridge::new().with_resolve_context(ResolveContext::default())
}

const VALUE_SCRIPT: &str = r#"cat > /dev/null
echo "Psy Shell v0.12.4 (PHP 8.3.6 - cli) by Justin Hileman"
echo "= 2"
echo ""
echo "   INFO  Goodbye."
"#;

#[tokio::test]
async fn run_returns_value_line() {
    let _guard = SPAWN_LOCK.lock().await;
    let project = laravel_project();
    vendor_php(project.path(), VALUE_SCRIPT);

    let result = isolated_bridge()
        .run(project.path(), "1 + 1", &Settings::default())
        .await;
    assert_eq!(result, "2");
}

#[tokio::test]
async fn run_without_output_is_null() {
    let _guard = SPAWN_LOCK.lock().await;
    let project = laravel_project();
    vendor_php(project.path(), "cat > /dev/null\necho \">>> \\$x = 1;\"\n");

    let result = isolated_bridge()
        .run(project.path(), "$x = 1;", &Settings::default())
        .await;
    assert_eq!(result, "null");
}

#[tokio::test]
async fn run_passes_snippet_and_artisan_args() {
    let _guard = SPAWN_LOCK.lock().await;
    let project = laravel_project();
    // Echo the arguments and the received stdin back as plain output.
    vendor_php(project.path(), "echo \"args: $*\"\ncat\n");

    let result = isolated_bridge()
        .run(project.path(), "<?php\n  echo 'hi';  ", &Settings::default())
        .await;
    assert_eq!(result, "args: artisan tinker\necho 'hi';");
}

#[tokio::test]
async fn run_keeps_stderr_output() {
    let _guard = SPAWN_LOCK.lock().await;
    let project = laravel_project();
    vendor_php(
        project.path(),
        "cat > /dev/null\necho \"PHP Parse error: Syntax error\" >&2\n",
    );

    let result = isolated_bridge()
        .run(project.path(), "1 +", &Settings::default())
        .await;
    assert_eq!(result, "PHP Parse error: Syntax error");
}

#[tokio::test]
async fn run_rejects_invalid_project_without_spawning() {
    let _guard = SPAWN_LOCK.lock().await;
    let project = TempDir::new().unwrap();
    let marker = project.path().join("spawned");
    vendor_php(project.path(), &format!("touch {}\n", marker.display()));

    let result = isolated_bridge()
        .run(project.path(), "1", &Settings::default())
        .await;
    assert_eq!(result, "Error: Invalid Laravel project path");
    assert!(!marker.exists());
}

#[tokio::test]
async fn run_uses_php_path_from_settings() {
    let _guard = SPAWN_LOCK.lock().await;
    let project = laravel_project();
    let elsewhere = TempDir::new().unwrap();
    let php = write_script(
        &elsewhere.path().join("php"),
        "cat > /dev/null\necho \"= 'from settings'\"\n",
    );
    let settings = Settings {
        php_path: php.display().to_string(),
        ..Settings::default()
    };

    let result = isolated_bridge().run(project.path(), "1", &settings).await;
    assert_eq!(result, "'from settings'");
}

#[tokio::test]
async fn run_times_out_and_kills_child() {
    let _guard = SPAWN_LOCK.lock().await;
    let project = laravel_project();
    let pid_file = project.path().join("pid");
    vendor_php(
        project.path(),
        &format!("echo $$ > {}\nexec sleep 30\n", pid_file.display()),
    );

    let result = isolated_bridge()
        .with_deadline(Duration::from_secs(1))
        .run(project.path(), "sleep(30);", &Settings::default())
        .await;
    assert_eq!(result, "Error: Execution timed out (1s limit)");

    let pid = std::fs::read_to_string(&pid_file).unwrap();
    let alive = std::process::Command::new("kill")
        .args(["-0", pid.trim()])
        .status()
        .unwrap();
    assert!(!alive.success(), "tinker process {pid} survived the deadline");
}

#[tokio::test]
async fn streaming_forwards_lines_and_skips_prompts() {
    let _guard = SPAWN_LOCK.lock().await;
    let project = laravel_project();
    vendor_php(
        project.path(),
        "cat > /dev/null\necho \">>> foreach (range(1, 2) as \\$i) echo \\$i;\"\necho 1\necho 2\n",
    );

    let (tx, mut rx) = mpsc::channel(16);
    let result = isolated_bridge()
        .run_streaming(project.path(), "foreach (range(1, 2) as $i) echo $i;", &Settings::default(), tx)
        .await;

    let mut lines = Vec::new();
    while let Some(line) = rx.recv().await {
        lines.push(line);
    }
    assert_eq!(lines, vec!["1", "2"]);
    assert_eq!(result, "1\n2");
}

#[tokio::test]
async fn streaming_reports_invalid_project() {
    let project = TempDir::new().unwrap();
    let (tx, mut rx) = mpsc::channel(4);

    let result = isolated_bridge()
        .run_streaming(project.path(), "1", &Settings::default(), tx)
        .await;
    assert_eq!(result, "Error: Invalid Laravel project path");
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn app_runs_tinker_with_saved_php_path() {
    let _guard = SPAWN_LOCK.lock().await;
    let home = TempDir::new().unwrap();
    let project = laravel_project();
    let bin = TempDir::new().unwrap();
    let php = write_script(&bin.path().join("php"), VALUE_SCRIPT);

    let (host, _events) = ChannelHost::new();
    let app = App::open_in(home.path(), Arc::new(host))
        .unwrap()
        .with_tinker(isolated_bridge());

    let mut settings = app.settings();
    settings.php_path = php.display().to_string();
    app.update_settings(settings).unwrap();

    assert_eq!(app.run_tinker(project.path(), "1 + 1").await, "2");
}
