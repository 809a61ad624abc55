//! fexcfg: inspect and edit FEXCore settings for emulated containers.
//!
//! # Usage
//!
//! ```text
//! fexcfg [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show     Print the saved presets, one per line
//!   summary  Print the saved presets as one line
//!   set      Save presets
//!   seed     Write first-run configs for bundled programs
//!   options  List the valid preset names
//!   versions List FEXCore versions and mark the one a shortcut runs with
//!   init     Write a default tool config file
//!
//! Options:
//!   --tool-config <PATH>  Tool settings file [env: FEXCFG_TOOL_CONFIG]
//!   --imagefs <DIR>       Image file system root [env: FEXCFG_IMAGEFS]
//! ```
//!
//! Per-container commands take either `--container <ID>` (path derived from
//! the image home) or `--file <PATH>` (any config file, e.g. an AppConfig).
//!
//! # Logging
//!
//! `RUST_LOG` wins when set; otherwise the tool config's `logging.level`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fexcfg::application::seed_app_configs::seed_app_configs;
use fexcfg::application::settings_form::OptionLists;
use fexcfg::infrastructure::fs::FileSystem;
use fexcfg::infrastructure::store::{derive_path, ConfigStore};
use fexcfg::infrastructure::tool_config::{
    default_config_path, load_tool_config, save_tool_config, ImageFsConfig, ToolConfig,
};
use fexcfg_core::{preferred_version, version_options};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit FEXCore (FEX-Emu) settings for emulated containers.
#[derive(Debug, Parser)]
#[command(name = "fexcfg", version)]
struct Cli {
    /// Tool settings file.  Defaults to the platform config directory.
    #[arg(long, global = true, env = "FEXCFG_TOOL_CONFIG")]
    tool_config: Option<PathBuf>,

    /// Image file system root.  Overrides `imagefs.root` from the tool config.
    #[arg(long, global = true, env = "FEXCFG_IMAGEFS")]
    imagefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Which config file a per-container command works on.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct Target {
    /// Container id; the file is `<home>-<ID>/.fex-emu/Config.json`.
    #[arg(long)]
    container: Option<String>,

    /// Explicit config file path.
    #[arg(long)]
    file: Option<PathBuf>,
}

impl Target {
    fn config_path(&self, imagefs: &ImageFsConfig) -> anyhow::Result<PathBuf> {
        match (&self.file, &self.container) {
            (Some(file), _) => Ok(file.clone()),
            (None, Some(id)) => Ok(derive_path(&imagefs.home_path(), id)),
            (None, None) => anyhow::bail!("either --container or --file is required"),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the saved presets, one per line.
    Show {
        #[command(flatten)]
        target: Target,
    },
    /// Print the saved presets as a single line.
    Summary {
        #[command(flatten)]
        target: Target,
    },
    /// Save presets.  Unknown names are written as empty flags.
    Set {
        #[command(flatten)]
        target: Target,
        /// Fastest, Fast, Slow or Slowest.
        #[arg(long, default_value = "Fast")]
        tso: String,
        /// Fast (reduced precision) or Slow (full precision).
        #[arg(long, default_value = "Fast")]
        x87: String,
        /// Enabled or Disabled.
        #[arg(long, default_value = "Disabled")]
        multiblock: String,
    },
    /// Write first-run configs for bundled programs that have none.
    Seed,
    /// List the valid preset names.
    Options,
    /// List FEXCore versions: bundled ones first, then installed profiles.
    Versions {
        /// Version bundled with the app (repeatable).
        #[arg(long = "builtin")]
        builtin: Vec<String>,
        /// Installed content profile entry name, e.g. `fexcore-2601` (repeatable).
        #[arg(long = "profile")]
        profiles: Vec<String>,
        /// Container's FEXCore version; marks the version in use with `*`.
        #[arg(long)]
        container_version: Option<String>,
        /// Shortcut override; wins over the container version when non-empty.
        #[arg(long, requires = "container_version")]
        shortcut_version: Option<String>,
    },
    /// Write the effective tool settings to the tool config file.
    Init,
}

// ── Command execution ─────────────────────────────────────────────────────────

/// Runs one command, writing user-facing output to `out`.
///
/// `tool_config_path` is where `init` writes; `None` when no path was given
/// and the platform has no config home.
fn run<F: FileSystem, W: Write>(
    command: &Command,
    tool: &ToolConfig,
    tool_config_path: Option<&Path>,
    store: &ConfigStore<F>,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Show { target } => {
            let path = target.config_path(&tool.imagefs)?;
            let outcome = store.load(&path);
            if outcome.is_default() {
                info!(path = %path.display(), "showing defaults");
            }
            let selection = outcome.selection();
            writeln!(out, "TSO mode: {}", selection.tso)?;
            writeln!(out, "x87 mode: {}", selection.x87)?;
            writeln!(out, "Multiblock: {}", selection.multiblock)?;
        }
        Command::Summary { target } => {
            let path = target.config_path(&tool.imagefs)?;
            writeln!(out, "{}", store.summarize(&path))?;
        }
        Command::Set {
            target,
            tso,
            x87,
            multiblock,
        } => {
            let path = target.config_path(&tool.imagefs)?;
            store
                .save(&path, tso, x87, multiblock)
                .with_context(|| format!("failed to save FEX settings to {}", path.display()))?;
            writeln!(out, "saved {}", path.display())?;
        }
        Command::Seed => {
            let dir = tool.imagefs.app_config_dir();
            let written = seed_app_configs(store, &dir)
                .with_context(|| format!("failed to seed app configs in {}", dir.display()))?;
            for path in written {
                writeln!(out, "{}", path.display())?;
            }
        }
        Command::Options => {
            let lists = OptionLists::default();
            writeln!(out, "tso: {}", lists.tso.join(", "))?;
            writeln!(out, "x87: {}", lists.x87.join(", "))?;
            writeln!(out, "multiblock: {}", lists.multiblock.join(", "))?;
        }
        Command::Versions {
            builtin,
            profiles,
            container_version,
            shortcut_version,
        } => {
            let options = version_options(builtin.as_slice(), profiles.as_slice());
            let current = container_version
                .as_deref()
                .map(|container| preferred_version(shortcut_version.as_deref(), container));
            for version in &options {
                let mark = if current == Some(version.as_str()) { "*" } else { " " };
                writeln!(out, "{mark} {version}")?;
            }
        }
        Command::Init => {
            let path = tool_config_path
                .context("no --tool-config given and no platform config directory found")?;
            save_tool_config(path, tool)
                .with_context(|| format!("failed to write tool config {}", path.display()))?;
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let tool_config_path = match &cli.tool_config {
        Some(path) => Some(path.clone()),
        None => default_config_path().ok(),
    };
    let mut tool = match &tool_config_path {
        Some(path) => load_tool_config(path)
            .with_context(|| format!("failed to load tool config {}", path.display()))?,
        None => ToolConfig::default(),
    };
    if let Some(root) = &cli.imagefs {
        tool.imagefs.root = root.clone();
    }

    // `RUST_LOG` takes precedence over the tool config's level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&tool.logging.level)),
        )
        .with_writer(io::stderr)
        .init();

    let store = ConfigStore::on_disk();
    let stdout = io::stdout();
    run(
        &cli.command,
        &tool,
        tool_config_path.as_deref(),
        &store,
        &mut stdout.lock(),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use fexcfg::infrastructure::fs::mock::MemoryFileSystem;
    use std::path::Path;

    fn tool_with_root(root: &str) -> ToolConfig {
        let mut tool = ToolConfig::default();
        tool.imagefs.root = PathBuf::from(root);
        tool
    }

    fn run_to_string(args: &[&str], store: &ConfigStore<MemoryFileSystem>) -> anyhow::Result<String> {
        let cli = Cli::parse_from(args);
        let mut out = Vec::new();
        run(&cli.command, &tool_with_root("/imagefs"), None, store, &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    #[test]
    fn test_target_requires_container_or_file() {
        assert!(Cli::try_parse_from(["fexcfg", "show"]).is_err());
    }

    #[test]
    fn test_target_rejects_both_container_and_file() {
        let result = Cli::try_parse_from(["fexcfg", "show", "--container", "1", "--file", "x.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_container_target_derives_path_from_imagefs() {
        let target = Target {
            container: Some("5".to_string()),
            file: None,
        };
        let imagefs = tool_with_root("/imagefs").imagefs;
        assert_eq!(
            target.config_path(&imagefs).unwrap(),
            PathBuf::from("/imagefs/home/xuser-5/.fex-emu/Config.json")
        );
    }

    #[test]
    fn test_set_defaults_are_fast_fast_disabled() {
        let cli = Cli::parse_from(["fexcfg", "set", "--container", "1"]);
        match cli.command {
            Command::Set { tso, x87, multiblock, .. } => {
                assert_eq!((tso.as_str(), x87.as_str(), multiblock.as_str()), ("Fast", "Fast", "Disabled"));
            }
            other => panic!("expected set, got {other:?}"),
        }
    }

    #[test]
    fn test_show_prints_defaults_for_unconfigured_container() {
        let store = ConfigStore::new(MemoryFileSystem::new());
        let out = run_to_string(&["fexcfg", "show", "--container", "9"], &store).unwrap();
        assert_eq!(out, "TSO mode: Fast\nx87 mode: Fast\nMultiblock: Disabled\n");
    }

    #[test]
    fn test_set_then_summary() {
        // Arrange
        let store = ConfigStore::new(MemoryFileSystem::new());

        // Act
        run_to_string(
            &["fexcfg", "set", "--container", "3", "--tso", "Slow", "--x87", "Slow", "--multiblock", "Enabled"],
            &store,
        )
        .unwrap();
        let out = run_to_string(&["fexcfg", "summary", "--container", "3"], &store).unwrap();

        // Assert
        assert_eq!(out, "TSOMode Slow, x87Mode Slow, MultiBlock Enabled\n");
        assert!(store
            .file_system()
            .contents(Path::new("/imagefs/home/xuser-3/.fex-emu/Config.json"))
            .is_some());
    }

    #[test]
    fn test_seed_lists_written_paths() {
        let store = ConfigStore::new(MemoryFileSystem::new());
        let out = run_to_string(&["fexcfg", "seed"], &store).unwrap();
        assert_eq!(
            out.trim(),
            Path::new("/imagefs/home/xuser/.fex-emu/AppConfig/winhandler.exe.json")
                .display()
                .to_string()
        );
    }

    #[test]
    fn test_options_lists_preset_names() {
        let store = ConfigStore::new(MemoryFileSystem::new());
        let out = run_to_string(&["fexcfg", "options"], &store).unwrap();
        assert!(out.contains("tso: Fastest, Fast, Slow, Slowest"));
        assert!(out.contains("multiblock: Enabled, Disabled"));
    }

    #[test]
    fn test_versions_lists_builtin_then_profiles_and_marks_shortcut_choice() {
        let store = ConfigStore::new(MemoryFileSystem::new());
        let out = run_to_string(
            &[
                "fexcfg", "versions", "--builtin", "2508", "--profile", "fexcore-2601",
                "--container-version", "2508", "--shortcut-version", "2601",
            ],
            &store,
        )
        .unwrap();
        assert_eq!(out, "  2508\n* 2601\n");
    }

    #[test]
    fn test_versions_marks_container_version_without_override() {
        let store = ConfigStore::new(MemoryFileSystem::new());
        let out = run_to_string(
            &["fexcfg", "versions", "--builtin", "2508", "--container-version", "2508"],
            &store,
        )
        .unwrap();
        assert_eq!(out, "* 2508\n");
    }

    #[test]
    fn test_init_without_tool_config_path_is_an_error() {
        let store = ConfigStore::new(MemoryFileSystem::new());
        let result = run_to_string(&["fexcfg", "init"], &store);
        assert!(result.is_err());
    }

    #[test]
    fn test_init_writes_tool_config_to_given_path() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("fexcfg_init_{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");
        let tool = tool_with_root("/srv/imagefs");
        let store = ConfigStore::new(MemoryFileSystem::new());
        let mut out = Vec::new();

        // Act
        run(&Command::Init, &tool, Some(&path), &store, &mut out).unwrap();

        // Assert
        assert_eq!(String::from_utf8(out).unwrap().trim(), path.display().to_string());
        assert_eq!(load_tool_config(&path).unwrap(), tool);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_imagefs_flag_is_global() {
        let cli = Cli::parse_from(["fexcfg", "summary", "--file", "a.json", "--imagefs", "/x"]);
        assert_eq!(cli.imagefs, Some(PathBuf::from("/x")));
    }
}
