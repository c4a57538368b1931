use std::time::Duration;

use reqwest::{Client, ClientBuilder};

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    /// One client per run; the timeout bounds the whole request, connect
    /// included.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = ClientBuilder::new().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Single GET, no retries. Non-success statuses come back as errors so
    /// the caller treats them like any other fetch failure.
    pub async fn fetch_url_body(&self, url: &str) -> anyhow::Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        Ok(body)
    }
}
