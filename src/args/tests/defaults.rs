use super::*;

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["polypath", "-w", "words.txt", "targets.txt"])?;

    let expected_no_color = std::env::var("NO_COLOR")
        .ok()
        .and_then(|value| parse_bool_env(&value).ok())
        .unwrap_or(false);

    let checks = [
        (
            args.targets.as_deref() == Some("targets.txt"),
            "Unexpected targets",
        ),
        (
            args.wordlist.as_deref() == Some("words.txt"),
            "Unexpected wordlist",
        ),
        (args.methods.as_slice() == [HttpMethod::Get], "Expected GET only"),
        (args.status_codes == vec![200], "Unexpected status codes"),
        (
            args.min_diff.millionths() == 200_000,
            "Unexpected min_diff",
        ),
        (args.max_errors == 0, "Expected unbounded error budget"),
        (!args.insecure, "Expected insecure to be false"),
        (args.workers.get() == 40, "Unexpected worker count"),
        (
            args.request_timeout == Duration::from_secs(3),
            "Unexpected request_timeout",
        ),
        (args.headers.is_empty(), "Expected no headers"),
        (args.config.is_none(), "Expected config to be None"),
        (!args.no_banner, "Expected banner enabled"),
        (!args.verbose, "Expected verbose to be false"),
        (args.no_color == expected_no_color, "Unexpected no_color"),
    ];

    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn targets_and_wordlist_are_optional_at_parse_time() -> AppResult<()> {
    let args = parse_test_args(["polypath"])?;
    if args.targets.is_some() || args.wordlist.is_some() {
        return Err(AppError::validation("Expected missing targets/wordlist"));
    }
    Ok(())
}
