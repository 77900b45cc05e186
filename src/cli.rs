//! # CLI Module / 命令行接口模块
//!
//! Builds the localized command-line interface and dispatches to the
//! `run`, `list` and `init` commands.
//!
//! 构建本地化的命令行接口，并分派到 `run`、`list` 和 `init` 命令。

pub mod commands;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::core::config::DEFAULT_CONFIG_FILE;
use crate::core::planner::Selection;
use crate::infra::t;
use commands::run::RunOptions;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|arg| arg == "--lang")
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

fn config_arg(locale: &str) -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help(t!("arg_config", locale = locale).to_string())
        .value_name("CONFIG")
        .default_value(DEFAULT_CONFIG_FILE)
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn selection_args(locale: &str) -> [Arg; 2] {
    [
        Arg::new("compiler")
            .long("compiler")
            .help(t!("arg_compiler", locale = locale).to_string())
            .value_name("COMPILER")
            .action(ArgAction::Append),
        Arg::new("build-type")
            .long("build-type")
            .help(t!("arg_build_type", locale = locale).to_string())
            .value_name("BUILD_TYPE")
            .action(ArgAction::Append),
    ]
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("build-matrix")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .args(selection_args(locale))
                .arg(
                    Arg::new("log")
                        .long("log")
                        .help(t!("arg_log", locale = locale).to_string())
                        .value_name("PATH")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("append")
                        .long("append")
                        .help(t!("arg_append", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .help(t!("arg_output_dir", locale = locale).to_string())
                        .value_name("DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help(t!("arg_jobs", locale = locale).to_string())
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .help(t!("arg_timeout", locale = locale).to_string())
                        .value_name("SECS")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help(t!("arg_html", locale = locale).to_string())
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("fail-on-error")
                        .long("fail-on-error")
                        .help(t!("arg_fail_on_error", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("list")
                .about(t!("cmd_list_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .args(selection_args(locale)),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_init_output", locale = locale).to_string())
                        .value_name("PATH")
                        .default_value(DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn selection_from(matches: &ArgMatches) -> Selection {
    let values = |id: &str| -> Vec<String> {
        matches
            .get_many::<String>(id)
            .map(|v| v.cloned().collect())
            .unwrap_or_default()
    };
    Selection {
        compilers: values("compiler"),
        build_types: values("build-type"),
    }
}

fn config_from(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let requested_lang = pre_parse_language();
    let language = crate::resolve_locale(requested_lang.as_deref());
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let options = RunOptions {
                config: config_from(run_matches),
                selection: selection_from(run_matches),
                log: run_matches.get_one::<PathBuf>("log").cloned(),
                append: run_matches.get_flag("append"),
                output_dir: run_matches.get_one::<PathBuf>("output-dir").cloned(),
                jobs: run_matches.get_one::<usize>("jobs").copied(),
                timeout_secs: run_matches.get_one::<u64>("timeout").copied(),
                html: run_matches.get_one::<PathBuf>("html").cloned(),
                fail_on_error: run_matches.get_flag("fail-on-error"),
            };
            commands::run::execute(options, requested_lang).await?;
        }
        Some(("list", list_matches)) => {
            commands::list::execute(
                &config_from(list_matches),
                &selection_from(list_matches),
                requested_lang,
            )?;
        }
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            commands::init::execute(
                &output,
                init_matches.get_flag("force"),
                init_matches.get_flag("non-interactive"),
                &language,
            )?;
        }
        _ => {
            // subcommand_required: clap has already printed help and exited.
        }
    }
    Ok(())
}
