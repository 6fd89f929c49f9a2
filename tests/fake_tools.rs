//! Full runs against shell-script stand-ins for the device tools
//!
//! Each test puts fake `pm`, `aapt`, `am`, `termux-open-url` and `fzf`
//! scripts at the front of `PATH`, so these tests are serialized.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use app_drawer::{Mode, Options};
use drawer_app::Overrides;
use drawer_core::Error;
use serial_test::serial;
use tempfile::TempDir;

const FAKE_PM: &str = r#"#!/bin/sh
case "$1" in
  list)
    printf 'package:com.beta\npackage:com.alpha\n'
    ;;
  resolve-activity)
    for last; do :; done
    if [ "$last" = "com.alpha" ]; then
      printf 'priority=0 preferredOrder=0 match=0x108000\n  ActivityInfo:\n    name=com.alpha.MainActivity\n'
    else
      echo 'No activity found'
    fi
    ;;
  path)
    printf 'package:/data/app/%s/base.apk\n' "$2"
    ;;
esac
"#;

const FAKE_AAPT: &str = r#"#!/bin/sh
case "$3" in
  */com.alpha/*) echo "application-label:'Alpha'" ;;
  *) exit 1 ;;
esac
"#;

struct FakeDevice {
    dir: TempDir,
    original_path: Option<std::ffi::OsString>,
}

impl FakeDevice {
    /// Install the fake tools; `selector_script` becomes the body of `fzf`
    fn install(selector_script: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dispatched");

        write_script(dir.path(), "pm", FAKE_PM);
        write_script(dir.path(), "aapt", FAKE_AAPT);
        write_script(
            dir.path(),
            "am",
            &format!("#!/bin/sh\necho \"am $*\" > '{}'\n", out.display()),
        );
        write_script(
            dir.path(),
            "termux-open-url",
            &format!("#!/bin/sh\necho \"open $1\" > '{}'\n", out.display()),
        );
        write_script(
            dir.path(),
            "fzf",
            &format!("#!/bin/sh\n{}\n", selector_script),
        );

        let original_path = std::env::var_os("PATH");
        let mut paths = vec![dir.path().to_path_buf()];
        if let Some(original) = &original_path {
            paths.extend(std::env::split_paths(original));
        }
        std::env::set_var("PATH", std::env::join_paths(paths).unwrap());

        Self { dir, original_path }
    }

    fn config(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn dispatched(&self) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join("dispatched"))
            .ok()
            .map(|s| s.trim().to_string())
    }

    fn options(&self, mode: Mode) -> Options {
        Options {
            config_path: Some(self.config("")),
            overrides: Overrides::default(),
            mode,
        }
    }
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        match &self.original_path {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }
    }
}

fn write_script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[tokio::test]
#[serial]
async fn test_launches_first_choice() {
    let device = FakeDevice::install("head -n 1");

    app_drawer::run(device.options(Mode::Interactive))
        .await
        .unwrap();

    assert_eq!(
        device.dispatched().as_deref(),
        Some("am start --user 0 -n com.alpha/com.alpha.MainActivity")
    );
}

#[tokio::test]
#[serial]
async fn test_unlaunchable_choice_opens_store() {
    let device = FakeDevice::install("tail -n 1");

    app_drawer::run(device.options(Mode::Interactive))
        .await
        .unwrap();

    assert_eq!(
        device.dispatched().as_deref(),
        Some("open https://play.google.com/store/apps/details?id=com.beta")
    );
}

#[tokio::test]
#[serial]
async fn test_user_override_reaches_launcher() {
    let device = FakeDevice::install("head -n 1");
    let mut options = device.options(Mode::Interactive);
    options.overrides.user = Some("10".to_string());

    app_drawer::run(options).await.unwrap();

    assert_eq!(
        device.dispatched().as_deref(),
        Some("am start --user 10 -n com.alpha/com.alpha.MainActivity")
    );
}

#[tokio::test]
#[serial]
async fn test_cancelled_selection_exits_nonzero() {
    let device = FakeDevice::install("cat > /dev/null; exit 130");

    let err = app_drawer::run(device.options(Mode::Interactive))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SelectionCancelled));
    assert_eq!(err.exit_code(), 1);
    assert!(device.dispatched().is_none());
}

#[tokio::test]
#[serial]
async fn test_missing_selector_is_fatal_before_probing() {
    let device = FakeDevice::install("head -n 1");
    let config = device.config("[selector]\ncommand = \"drawer-missing-selector\"\n");

    let err = app_drawer::run(Options {
        config_path: Some(config),
        overrides: Overrides::default(),
        mode: Mode::Interactive,
    })
    .await
    .unwrap_err();

    assert!(matches!(err, Error::ToolNotFound { ref tool, .. } if tool == "drawer-missing-selector"));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
#[serial]
async fn test_list_mode_skips_selector() {
    // A selector that would fail the run if it were started
    let device = FakeDevice::install("exit 2");
    let config = device.config("[selector]\ncommand = \"drawer-missing-selector\"\n");

    app_drawer::run(Options {
        config_path: Some(config),
        overrides: Overrides::default(),
        mode: Mode::List,
    })
    .await
    .unwrap();

    assert!(device.dispatched().is_none());
}

#[tokio::test]
#[serial]
async fn test_invalid_explicit_config_is_fatal() {
    let device = FakeDevice::install("head -n 1");
    let config = device.config("[probe]\nmin_workers = 9\nmax_workers = 2\n");

    let err = app_drawer::run(Options {
        config_path: Some(config),
        overrides: Overrides::default(),
        mode: Mode::Interactive,
    })
    .await
    .unwrap_err();

    assert!(matches!(err, Error::ConfigInvalid { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
#[serial]
async fn test_init_config_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app-drawer").join("config.toml");

    app_drawer::run(Options {
        config_path: Some(path.clone()),
        overrides: Overrides::default(),
        mode: Mode::InitConfig,
    })
    .await
    .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[probe]"));
    assert!(written.contains("termux-open-url"));
}
