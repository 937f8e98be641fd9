use std::time::Duration;

use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue},
};

use crate::{
    args::DEFAULT_USER_AGENT,
    error::{AppError, AppResult, HttpError},
};

/// Transport options shared by every request of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    pub timeout: Duration,
    pub insecure: bool,
}

/// Builds the shared client: fixed timeout, default redirect policy, and
/// optionally no TLS verification.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialized.
pub fn build_client(settings: ClientSettings) -> AppResult<Client> {
    let mut client_builder = Client::builder()
        .timeout(settings.timeout)
        .user_agent(DEFAULT_USER_AGENT);

    if settings.insecure {
        client_builder = client_builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    client_builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

/// Turns header pairs into the map sent with every request. A later pair with
/// the same name replaces an earlier one.
///
/// # Errors
///
/// Returns an error when a name or value is not valid in an HTTP header.
pub fn build_header_map(headers: &[(String, String)]) -> AppResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            AppError::http(HttpError::InvalidHeaderName {
                name: key.clone(),
                source: err,
            })
        })?;
        let value = HeaderValue::from_str(value).map_err(|err| {
            AppError::http(HttpError::InvalidHeaderValue {
                name: key.clone(),
                source: err,
            })
        })?;
        map.insert(name, value);
    }
    Ok(map)
}
