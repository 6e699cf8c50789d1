// Copyright 2022 Yin Guanhao <sopium@mysterious.site>

// This file is part of add-copyright.

// add-copyright is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// add-copyright is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with add-copyright.  If not, see <https://www.gnu.org/licenses/>.

use crate::cli;
use crate::inject::{self, InjectConfig};
use anyhow::{bail, Context};
use clap::{crate_version, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(
    rename_all = "kebab",
    about = include_str!("copyright.txt"),
    args_conflicts_with_subcommands = true
)]
struct Options {
    #[clap(flatten)]
    target: TargetArgs,

    #[clap(subcommand)]
    cmd: Option<Cmd>,
}

/// Which files to look at, shared by the default action and `verify`.
#[derive(Args)]
#[clap(rename_all = "kebab")]
struct TargetArgs {
    #[clap(short, long, help = "Load settings from TOML file")]
    config_file: Option<PathBuf>,

    #[clap(
        short,
        long,
        value_name = "EXT",
        value_delimiter = ',',
        help = "Qualifying file extensions, e.g. .ts,.tsx"
    )]
    extensions: Vec<String>,

    #[clap(
        short = 'x',
        long,
        value_name = "NAME",
        help = "Directory name to skip (repeatable)"
    )]
    exclude_dir: Vec<String>,

    #[clap(long, help = "Set logging (env_logger)", env = "RUST_LOG")]
    log: Option<String>,

    #[clap(value_name = "ROOT", help = "Directory to walk [default: .]")]
    root: Option<PathBuf>,
}

impl TargetArgs {
    /// Merge command line, config file and defaults, then start logging.
    fn load(self) -> anyhow::Result<InjectConfig> {
        let config = if let Some(ref p) = self.config_file {
            cli::load_config_from_path(p, true)
                .with_context(|| format!("loading {}", p.display()))?
        } else {
            cli::Config::default()
        };

        let log = self
            .log
            .as_deref()
            .or_else(|| config.general.log.as_deref())
            .unwrap_or("warn");
        init_logger(log);

        let mut inject_config = config.inject_config();
        if let Some(root) = self.root {
            inject_config.root = root;
        }
        if !self.extensions.is_empty() {
            inject_config = inject_config.with_extensions(self.extensions);
        }
        if !self.exclude_dir.is_empty() {
            inject_config = inject_config.with_excluded_dirs(self.exclude_dir);
        }
        debug!("{:?}", inject_config);
        Ok(inject_config)
    }
}

fn init_logger(filter: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    builder.format_timestamp_millis();
    // Only fails if a logger is already set.
    let _ = builder.try_init();
}

#[derive(Subcommand)]
enum Cmd {
    #[clap(about = "Report files missing the header without modifying them")]
    Verify {
        #[clap(flatten)]
        target: TargetArgs,
    },
    #[clap(about = "Check configuration file validity")]
    CheckConfig {
        config_file: PathBuf,
        #[clap(long, help = "Print the effective configuration")]
        print: bool,
    },
}

fn add_headers(target: TargetArgs, version: &str) -> anyhow::Result<()> {
    let config = target.load()?;
    info!("add-copyright {}", version);
    info!("walking {}", config.root.display());

    let mut report = cli::ConsoleReport::stdio();
    report.start("Adding copyright headers under", &config.root);
    let summary = inject::traverse(&config, &mut report);
    report.finish(&summary);

    if summary.failures() > 0 {
        bail!("{} file(s) could not be processed", summary.failures());
    }
    Ok(())
}

fn verify(target: TargetArgs, version: &str) -> anyhow::Result<()> {
    let config = target.load()?;
    info!("add-copyright {}", version);

    let mut report = cli::ConsoleReport::stdio();
    report.start("Verifying copyright headers under", &config.root);
    let summary = inject::verify(&config, &mut report);
    report.finish(&summary);

    if summary.failures() > 0 {
        bail!("{} file(s) could not be processed", summary.failures());
    }
    if summary.missing > 0 {
        bail!("{} file(s) missing copyright header", summary.missing);
    }
    Ok(())
}

fn check_config(config_file: PathBuf, print: bool) -> anyhow::Result<()> {
    let config = cli::load_config_from_path(&config_file, true)?;
    if print {
        let mut effective = config;
        let inject_config = effective.inject_config();
        effective.inject.root = Some(inject_config.root);
        effective.inject.extensions = Some(inject_config.extensions.into_iter().collect());
        effective.inject.excluded_dirs = Some(inject_config.excluded_dirs.into_iter().collect());
        print!(
            "{}",
            toml::to_string_pretty(&effective).context("serialize config file")?
        );
    }
    Ok(())
}

fn version() -> &'static str {
    if !env!("GIT_HASH").is_empty() {
        concat!(crate_version!(), "-", env!("GIT_HASH"))
    } else {
        crate_version!()
    }
}

fn command(version: &'static str) -> clap::Command<'static> {
    Options::command().version(version)
}

pub fn real_main() -> anyhow::Result<()> {
    let default_panic_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        default_panic_hook(panic_info);
        std::process::exit(2);
    }));

    let version = version();
    let matches = command(version).get_matches();
    let options = Options::from_arg_matches(&matches)?;

    match options.cmd {
        None => add_headers(options.target, version),
        Some(Cmd::Verify { target }) => verify(target, version),
        Some(Cmd::CheckConfig { config_file, print }) => check_config(config_file, print),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn command_line_is_valid() {
        command(version()).debug_assert();
    }

    #[test]
    fn version_flag() {
        let err = command(version())
            .try_get_matches_from(&["add-copyright", "--version"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::ErrorKind::DisplayVersion);
        assert!(err.to_string().contains(crate_version!()));
    }

    #[test]
    fn help_shows_version() {
        let mut help = Vec::new();
        command(version()).write_long_help(&mut help).unwrap();
        let help = String::from_utf8(help).unwrap();
        assert!(help.starts_with(&format!("add-copyright {}", version())));
    }

    #[test]
    fn default_action() {
        let options =
            Options::try_parse_from(&["add-copyright", "-e", "ts,.py", "-x", "vendor", "web"])
                .unwrap();
        assert!(options.cmd.is_none());
        assert_eq!(options.target.extensions, vec!["ts", ".py"]);
        assert_eq!(options.target.exclude_dir, vec!["vendor"]);
        assert_eq!(options.target.root, Some(PathBuf::from("web")));
    }

    #[test]
    fn verify_subcommand() {
        let options =
            Options::try_parse_from(&["add-copyright", "verify", "-c", "h.toml", "src"]).unwrap();
        match options.cmd {
            Some(Cmd::Verify { target }) => {
                assert_eq!(target.config_file, Some(PathBuf::from("h.toml")));
                assert_eq!(target.root, Some(PathBuf::from("src")));
            }
            _ => panic!("expected verify"),
        }
    }

    #[test]
    fn check_config_subcommand() {
        let options =
            Options::try_parse_from(&["add-copyright", "check-config", "--print", "h.toml"])
                .unwrap();
        match options.cmd {
            Some(Cmd::CheckConfig { config_file, print }) => {
                assert_eq!(config_file, PathBuf::from("h.toml"));
                assert!(print);
            }
            _ => panic!("expected check-config"),
        }
    }

    #[test]
    fn command_line_overrides_config_file() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let p = temp.path().join("headers.toml");
        std::fs::write(
            &p,
            "[Inject]\nRoot = \"web\"\nExtensions = [\".ts\"]\nExcludedDirs = [\"gen\"]\n",
        )?;

        let args: Vec<OsString> = vec![
            "add-copyright".into(),
            "-c".into(),
            p.clone().into(),
            "-e".into(),
            "py".into(),
        ];
        let options = Options::try_parse_from(args)?;
        let config = options.target.load()?;
        assert_eq!(config.root, temp.path().join("web"));
        assert!(config.extensions.contains(".py"));
        assert!(!config.extensions.contains(".ts"));
        assert!(config.excluded_dirs.contains("gen"));
        Ok(())
    }
}
