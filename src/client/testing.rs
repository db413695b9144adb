//! In-process fake backends for SDK tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::api_client::ApiClient;
use super::config::ClientConfig;
use super::token_store::TokenStore;
use super::Client;

/// An axum router served on an ephemeral port, with a client pointed at it
pub struct FakeBackend {
    pub addr: SocketAddr,
    api: Arc<ApiClient>,
    tokens: Arc<TokenStore>,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Routes are mounted as given; register them with their `/api` prefix
    pub async fn start(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let mut config = ClientConfig::new(format!("http://{}/api", addr));
        config.redirect_delay = Duration::from_millis(20);
        config.request_timeout = Duration::from_secs(5);

        let tokens = Arc::new(TokenStore::in_memory());
        let api = Arc::new(ApiClient::new(&config, tokens.clone()).unwrap());

        Self {
            addr,
            api,
            tokens,
            server,
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    pub fn client(&self) -> Client {
        Client::from_api(self.api.clone())
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}
