use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::{error, info};

use polypath::args::{DEFAULT_CONFIG_FILES, HttpMethod, ProbeArgs, dedup_methods};
use polypath::config::{apply_config, load_config};
use polypath::error::{AppError, AppResult, ValidationError};
use polypath::http::{ClientSettings, HttpExecutor, build_client, build_header_map};
use polypath::input::{load_headers, load_targets, load_wordlist};
use polypath::probe::{ProbePlan, ProbeSettings, run_probe};
use polypath::shutdown::shutdown_channel;

use crate::shutdown_handlers::setup_signal_shutdown_handler;

const BANNER: &str = r"
                _                         _     _
  _ __   ___   | |  _   _   _ __    __ _ | |_  | |__
 | '_ \ / _ \  | | | | | | | '_ \  / _` || __| | '_ \
 | |_) | (_) | | | | |_| | | |_) || (_| || |_  | | | |
 | .__/ \___/  |_|  \__, | | .__/  \__,_| \__| |_| |_|
 |_|                |___/  |_|
";

/// Run inputs after config merging and file loading.
struct RunPlan {
    probe: ProbePlan,
    headers: Vec<(String, String)>,
    client: ClientSettings,
}

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, &matches))
}

fn parse_args() -> AppResult<Option<(ProbeArgs, ArgMatches)>> {
    let mut cmd = ProbeArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = ProbeArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(mut args: ProbeArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }

    if !args.no_banner {
        eprintln!("{}", BANNER);
    }

    let plan = build_plan(&args)?;
    log_plan(&plan);
    execute_plan(plan).await
}

fn build_plan(args: &ProbeArgs) -> AppResult<RunPlan> {
    let Some(targets_path) = args.targets.as_deref() else {
        error!("Missing targets file.");
        return Err(AppError::validation(ValidationError::MissingTargets));
    };
    let Some(wordlist_path) = args.wordlist.as_deref() else {
        error!("Missing wordlist (set -w or provide in config).");
        return Err(AppError::validation(ValidationError::MissingWordlist));
    };

    let methods = dedup_methods(args.methods.as_slice());
    if methods.is_empty() {
        return Err(AppError::validation(ValidationError::NoMethods));
    }

    let headers = load_headers(&args.headers)?;
    let targets = load_targets(Path::new(targets_path))?;
    let paths = load_wordlist(Path::new(wordlist_path))?;

    Ok(RunPlan {
        probe: ProbePlan {
            methods,
            targets,
            paths,
            settings: ProbeSettings {
                workers: args.workers,
                min_diff: args.min_diff,
                acceptable_status: args.status_codes.iter().copied().collect::<BTreeSet<u16>>(),
                max_errors: args.max_errors,
            },
        },
        headers,
        client: ClientSettings {
            timeout: args.request_timeout,
            insecure: args.insecure,
        },
    })
}

fn log_plan(plan: &RunPlan) {
    let probe = &plan.probe;
    info!("Identified {} targets", probe.targets.len());
    info!("Loaded {} paths", probe.paths.len());
    info!("Total requests: {}", probe.total_requests());
    info!("Request methods: {}", join_methods(&probe.methods));
    info!(
        "Status codes: {}",
        probe
            .settings
            .acceptable_status
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    for (name, value) in &plan.headers {
        info!("Request header > \"{}: {}\"", name, value);
    }
    info!("Number of workers: {}", probe.settings.workers.get());
    info!("Minimum diff: {}", probe.settings.min_diff);
}

fn join_methods(methods: &[HttpMethod]) -> String {
    methods
        .iter()
        .map(|method| method.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    let client = build_client(plan.client)?;
    let headers = build_header_map(&plan.headers)?;
    let executor = Arc::new(HttpExecutor::new(client, headers));

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let outcome = run_probe(
        Arc::new(plan.probe),
        executor,
        std::io::stdout(),
        &shutdown_tx,
    )
    .await;

    drop(shutdown_tx.send(()));
    drop(signal_handle.await);

    match outcome {
        Ok(report) => {
            info!(
                requests = report.results.saturating_add(report.failures),
                failures = report.failures,
                hits = report.hits,
                "Done!"
            );
            Ok(())
        }
        Err(err) => {
            if !err.is_budget_exhausted() {
                error!("{}", err);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn help_shown_only_without_args() -> Result<(), String> {
        if has_default_config() {
            return Ok(());
        }
        if !should_show_help(&[OsString::from("polypath")]) {
            return Err("Expected help for bare invocation".to_owned());
        }
        if !should_show_help(&[OsString::from("polypath"), OsString::from("--")]) {
            return Err("Expected help for bare `--`".to_owned());
        }
        if should_show_help(&[OsString::from("polypath"), OsString::from("targets.txt")]) {
            return Err("Did not expect help with a targets file".to_owned());
        }
        Ok(())
    }

    #[test]
    fn build_plan_requires_targets_and_wordlist() -> Result<(), String> {
        let args = ProbeArgs::try_parse_from(["polypath", "-w", "words.txt"])
            .map_err(|err| err.to_string())?;
        match build_plan(&args) {
            Err(AppError::Validation(ValidationError::MissingTargets)) => {}
            other => return Err(format!("Expected MissingTargets, got {:?}", other.err())),
        }

        let args =
            ProbeArgs::try_parse_from(["polypath", "targets.txt"]).map_err(|err| err.to_string())?;
        match build_plan(&args) {
            Err(AppError::Validation(ValidationError::MissingWordlist)) => Ok(()),
            other => Err(format!("Expected MissingWordlist, got {:?}", other.err())),
        }
    }

    #[test]
    fn join_methods_keeps_order() -> Result<(), String> {
        let joined = join_methods(&[HttpMethod::Post, HttpMethod::Get]);
        if joined != "POST, GET" {
            return Err(format!("Unexpected join: {}", joined));
        }
        Ok(())
    }
}
