use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tracing::info;

use crate::agent::Agent;
use crate::api::handlers::{handle_config, handle_health, handle_infer, handle_profile};

pub struct AgentServer {
    pub port: u16,
    pub agent: Arc<Agent>,
}

impl AgentServer {
    pub fn new(port: u16, agent: Arc<Agent>) -> Self {
        Self { port, agent }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handle_health))
            .route("/config", get(handle_config))
            .route("/config/profile", put(handle_profile))
            .route("/infer", post(handle_infer))
            .with_state(self.agent.clone())
    }

    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, "infer-router listening");
        axum::Server::bind(&addr)
            .serve(self.router().into_make_service())
            .await?;
        Ok(())
    }
}
