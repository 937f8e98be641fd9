use super::*;

#[test]
fn parse_header_valid() -> AppResult<()> {
    let parsed = parse_header("Content-Type: application/json");
    match parsed {
        Ok((key, value)) => {
            if key != "Content-Type" {
                return Err(AppError::validation(format!("Unexpected key: {}", key)));
            }
            if value != "application/json" {
                return Err(AppError::validation(format!("Unexpected value: {}", value)));
            }
            Ok(())
        }
        Err(err) => Err(AppError::validation(format!(
            "Expected Ok, got Err: {}",
            err
        ))),
    }
}

#[test]
fn parse_header_keeps_colons_in_value() -> AppResult<()> {
    let (key, value) = parse_header("Referer: http://example.com:8080/")
        .map_err(|err| AppError::validation(format!("Expected Ok, got Err: {}", err)))?;
    if key != "Referer" || value != "http://example.com:8080/" {
        return Err(AppError::validation(format!(
            "Unexpected header: {}: {}",
            key, value
        )));
    }
    Ok(())
}

#[test]
fn parse_header_invalid() -> AppResult<()> {
    if parse_header("MissingDelimiter").is_ok() {
        return Err(AppError::validation("Expected Err for invalid header"));
    }
    if parse_header(" : value").is_ok() {
        return Err(AppError::validation("Expected Err for empty header name"));
    }
    Ok(())
}

#[test]
fn header_flag_is_repeatable() -> AppResult<()> {
    let args = parse_test_args([
        "polypath",
        "-H",
        "X-One: 1,X-Two: 2",
        "-H",
        "@headers.txt",
    ])?;
    if args.headers != vec!["X-One: 1,X-Two: 2".to_owned(), "@headers.txt".to_owned()] {
        return Err(AppError::validation(format!(
            "Unexpected headers: {:?}",
            args.headers
        )));
    }
    Ok(())
}
