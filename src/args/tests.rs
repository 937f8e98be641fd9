use super::*;
use crate::args::parsers::{parse_bool_env, parse_duration_arg};
use crate::args::test_support::parse_test_args;
use crate::error::{AppError, AppResult};
use std::time::Duration;

mod defaults;
mod headers;
mod methods;
