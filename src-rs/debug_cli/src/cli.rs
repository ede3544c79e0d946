use clap::Parser;

use crate::models::CLIConfig;

const DEFAULT_URL: &str = "http://localhost:8080";
const DEFAULT_TASK: &str = "conversationalResponse";

#[derive(Debug, Parser)]
#[command(name = "infer-debug", about = "Interactive client for the infer-router API")]
pub struct Args {
    /// Router base URL
    #[arg(long = "base", env = "INFER_ROUTER_URL", default_value = DEFAULT_URL)]
    pub base_url: String,

    /// Task kind used for each message, e.g. fastCodeFixer
    #[arg(long, env = "INFER_ROUTER_TASK", default_value = DEFAULT_TASK)]
    pub task: String,

    /// Force a model id instead of the table entry
    #[arg(long, env = "INFER_ROUTER_MODEL")]
    pub model: Option<String>,

    #[arg(long = "system", env = "INFER_ROUTER_SYSTEM_PROMPT")]
    pub system_prompt: Option<String>,

    #[arg(long = "temp")]
    pub temperature: Option<f32>,

    /// Print raw provider responses
    #[arg(long, env = "INFER_ROUTER_DEBUG")]
    pub debug: bool,

    /// Bearer token for routers deployed behind a gateway
    #[arg(long, env = "INFER_ROUTER_TOKEN")]
    pub token: Option<String>,
}

pub fn parse_config() -> CLIConfig {
    from_args(Args::parse())
}

fn from_args(args: Args) -> CLIConfig {
    CLIConfig {
        base_url: args.base_url,
        task: args.task,
        model: args.model.filter(|m| !m.trim().is_empty()),
        system_prompt: args.system_prompt.filter(|p| !p.trim().is_empty()),
        temperature: args.temperature,
        debug: args.debug,
        token: args.token.filter(|t| !t.trim().is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_router() {
        let cfg = from_args(Args::parse_from(["infer-debug"]));
        assert_eq!(cfg.base_url, DEFAULT_URL);
        assert_eq!(cfg.task, DEFAULT_TASK);
        assert!(cfg.model.is_none());
        assert!(!cfg.debug);
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = from_args(Args::parse_from([
            "infer-debug",
            "--base",
            "http://router:9000",
            "--task",
            "fastCodeFixer",
            "--model",
            "qwen/qwen3-coder",
            "--temp",
            "0.0",
            "--debug",
        ]));
        assert_eq!(cfg.base_url, "http://router:9000");
        assert_eq!(cfg.task, "fastCodeFixer");
        assert_eq!(cfg.model.as_deref(), Some("qwen/qwen3-coder"));
        assert_eq!(cfg.temperature, Some(0.0));
        assert!(cfg.debug);
    }
}
