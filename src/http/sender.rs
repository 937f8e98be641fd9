use async_trait::async_trait;
use reqwest::{Client, Response, header::HeaderMap};

use crate::probe::{RequestExecutor, RequestJob, ResponseSummary};

/// Sends probe requests through one shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    headers: HeaderMap,
}

impl HttpExecutor {
    #[must_use]
    pub const fn new(client: Client, headers: HeaderMap) -> Self {
        Self { client, headers }
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    type Response = Response;
    type Error = reqwest::Error;

    async fn send(&self, job: &RequestJob) -> Result<Response, reqwest::Error> {
        self.client
            .request(job.method.to_reqwest(), job.url())
            .headers(self.headers.clone())
            .send()
            .await
    }

    async fn drain(&self, mut response: Response) -> Result<ResponseSummary, reqwest::Error> {
        let status = response.status().as_u16();
        let mut length: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            length = length.saturating_add(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
        }
        Ok(ResponseSummary { status, length })
    }
}
