use super::{apply_config, load_config_file, types::ConfigFile};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::{HttpMethod, ProbeArgs};

fn parse_with_matches(argv: &[&str]) -> Result<(ProbeArgs, clap::ArgMatches), String> {
    let matches = ProbeArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args = ProbeArgs::from_arg_matches(&matches).map_err(|err| format!("{}", err))?;
    Ok((args, matches))
}

fn write_config(name: &str, content: &str) -> Result<ConfigFile, String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join(name);
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;
    load_config_file(&path).map_err(|err| err.to_string())
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let config = write_config(
        "polypath.toml",
        r#"
targets = "targets.txt"
wordlist = "words.txt"
headers = ["Cookie: a=b", "@headers.txt"]
methods = ["get", "POST"]
status = [200, 403]
min_diff = 0.35
max_errors = 5
workers = 12
insecure = true
timeout = "750ms"
"#,
    )?;

    if config.targets.as_deref() != Some("targets.txt") {
        return Err("Unexpected targets".to_owned());
    }
    if config.methods != Some(vec![HttpMethod::Get, HttpMethod::Post]) {
        return Err(format!("Unexpected methods: {:?}", config.methods));
    }
    if config.status != Some(vec![200, 403]) {
        return Err("Unexpected status".to_owned());
    }
    let min_diff = config
        .min_diff
        .as_ref()
        .ok_or_else(|| "Expected min_diff".to_owned())?
        .to_min_diff()
        .map_err(|err| err.to_string())?;
    if min_diff.millionths() != 350_000 {
        return Err(format!("Unexpected min_diff: {}", min_diff));
    }
    let timeout = config
        .timeout
        .as_ref()
        .ok_or_else(|| "Expected timeout".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if timeout != Duration::from_millis(750) {
        return Err("Unexpected timeout".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let config = write_config(
        "polypath.json",
        r#"{
  "wordlist": "words.txt",
  "method": ["delete"],
  "min_diff": "0.5",
  "concurrency": 3,
  "timeout": 2
}"#,
    )?;
    if config.methods != Some(vec![HttpMethod::Delete]) {
        return Err("Unexpected methods".to_owned());
    }
    if config.workers != Some(3) {
        return Err("Unexpected workers".to_owned());
    }
    let timeout = config
        .timeout
        .as_ref()
        .ok_or_else(|| "Expected timeout".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if timeout != Duration::from_secs(2) {
        return Err("Unexpected timeout".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    if write_config("polypath.yaml", "workers: 3").is_ok() {
        return Err("Expected Err for yaml config".to_owned());
    }
    Ok(())
}

#[test]
fn unknown_method_in_config_is_rejected() -> Result<(), String> {
    if write_config("polypath.toml", "methods = [\"FETCH\"]").is_ok() {
        return Err("Expected Err for unknown method".to_owned());
    }
    Ok(())
}

#[test]
fn config_fills_values_not_given_on_cli() -> Result<(), String> {
    let config = ConfigFile {
        targets: Some("from-config.txt".to_owned()),
        wordlist: Some("config-words.txt".to_owned()),
        methods: Some(vec![HttpMethod::Head]),
        status: Some(vec![204]),
        max_errors: Some(9),
        workers: Some(4),
        insecure: Some(true),
        ..ConfigFile::default()
    };
    let (mut args, matches) =
        parse_with_matches(&["polypath", "-w", "cli-words.txt", "-n", "16"])?;
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.targets.as_deref() != Some("from-config.txt") {
        return Err("Expected targets from config".to_owned());
    }
    if args.wordlist.as_deref() != Some("cli-words.txt") {
        return Err("Expected CLI wordlist to win".to_owned());
    }
    if args.workers.get() != 16 {
        return Err("Expected CLI workers to win".to_owned());
    }
    if args.methods.as_slice() != [HttpMethod::Head] {
        return Err("Expected methods from config".to_owned());
    }
    if args.status_codes != vec![204] {
        return Err("Expected status from config".to_owned());
    }
    if args.max_errors != 9 || !args.insecure {
        return Err("Expected max_errors/insecure from config".to_owned());
    }
    Ok(())
}

#[test]
fn config_rejects_invalid_values() -> Result<(), String> {
    let cases = [
        ConfigFile {
            status: Some(vec![700]),
            ..ConfigFile::default()
        },
        ConfigFile {
            workers: Some(0),
            ..ConfigFile::default()
        },
        ConfigFile {
            min_diff: Some(super::types::MinDiffValue::Number(3.5)),
            ..ConfigFile::default()
        },
        ConfigFile {
            timeout: Some(super::types::DurationValue::Seconds(0)),
            ..ConfigFile::default()
        },
    ];
    for config in cases {
        let (mut args, matches) = parse_with_matches(&["polypath"])?;
        if apply_config(&mut args, &matches, &config).is_ok() {
            return Err(format!("Expected Err for config {:?}", config));
        }
    }
    Ok(())
}
