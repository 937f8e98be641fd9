use super::*;

#[test]
fn methods_are_case_insensitive_and_comma_separated() -> AppResult<()> {
    let args = parse_test_args(["polypath", "-X", "get,Post,DELETE,options"])?;
    let expected = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
    ];
    if args.methods.as_slice() != expected {
        return Err(AppError::validation(format!(
            "Unexpected methods: {:?}",
            args.methods
        )));
    }
    Ok(())
}

#[test]
fn method_list_trims_entries_and_skips_empty_ones() -> AppResult<()> {
    let args = parse_test_args(["polypath", "-X", "GET, POST"])?;
    if args.methods.as_slice() != [HttpMethod::Get, HttpMethod::Post] {
        return Err(AppError::validation(format!(
            "Unexpected methods for 'GET, POST': {:?}",
            args.methods
        )));
    }

    let args = parse_test_args(["polypath", "-X", "GET,,post"])?;
    if args.methods.as_slice() != [HttpMethod::Get, HttpMethod::Post] {
        return Err(AppError::validation(format!(
            "Unexpected methods for 'GET,,post': {:?}",
            args.methods
        )));
    }

    let args = parse_test_args(["polypath", "-X", " , "])?;
    if !args.methods.as_slice().is_empty() {
        return Err(AppError::validation("Expected no methods from blank entries"));
    }
    Ok(())
}

#[test]
fn unknown_method_is_rejected() -> AppResult<()> {
    if parse_test_args(["polypath", "-X", "GET,FETCH"]).is_ok() {
        return Err(AppError::validation("Expected Err for unknown method"));
    }
    Ok(())
}

#[test]
fn dedup_methods_keeps_first_occurrence_order() -> AppResult<()> {
    let methods = [
        HttpMethod::Put,
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Trace,
        HttpMethod::Get,
    ];
    let unique = dedup_methods(&methods);
    if unique != vec![HttpMethod::Put, HttpMethod::Get, HttpMethod::Trace] {
        return Err(AppError::validation(format!(
            "Unexpected dedup result: {:?}",
            unique
        )));
    }
    Ok(())
}

#[test]
fn method_from_str_accepts_padding_and_case() -> AppResult<()> {
    let method: HttpMethod = " patch ".parse()?;
    if method != HttpMethod::Patch || method.as_str() != "PATCH" {
        return Err(AppError::validation("Expected PATCH"));
    }
    if "connect".parse::<HttpMethod>()?.to_reqwest() != reqwest::Method::CONNECT {
        return Err(AppError::validation("Expected CONNECT to map to reqwest"));
    }
    Ok(())
}
