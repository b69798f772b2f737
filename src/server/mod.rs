pub mod api;

use crate::llm::ChatClient;
use std::error::Error;
use std::sync::Arc;

pub struct Server {
    addr: String,
    client: Option<Arc<dyn ChatClient>>,
}

impl Server {
    /// `client` is `None` when no upstream API key was configured; chat
    /// requests are then rejected per request instead of failing at boot.
    pub fn new(addr: String, client: Option<Arc<dyn ChatClient>>) -> Self {
        Self { addr, client }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(&self.addr, self.client.clone()).await
    }
}
