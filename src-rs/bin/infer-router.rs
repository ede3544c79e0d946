use std::process;
use std::sync::Arc;

use infer_router_rs::api::server::AgentServer;
use infer_router_rs::helpers::{build_agent, init_tracing};
use infer_router_rs::InferenceConfig;
use tracing::error;

#[tokio::main]
async fn main() {
    init_tracing();

    let cfg = match InferenceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            process::exit(1);
        }
    };
    let agent = match build_agent("infer-router", &cfg) {
        Ok(agent) => agent,
        Err(err) => {
            error!(error = %err, "failed to build agent");
            process::exit(1);
        }
    };

    let server = AgentServer::new(cfg.port, Arc::new(agent));
    if let Err(err) = server.start().await {
        error!(error = %err, "server error");
        process::exit(1);
    }
}
