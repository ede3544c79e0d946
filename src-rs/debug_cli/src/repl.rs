use std::io;

use crate::client::HTTPClient;
use crate::models::{CLIConfig, ChatMessage, InferRequest};
use crate::render;

pub struct REPL {
    pub config: CLIConfig,
    pub client: HTTPClient,
    pub history: Vec<ChatMessage>,
}

impl REPL {
    pub fn new(config: CLIConfig, client: HTTPClient) -> Self {
        Self {
            config,
            client,
            history: Vec::new(),
        }
    }

    pub fn run(&mut self) {
        render::banner(&self.config);
        loop {
            render::prompt(&self.config.task);
            let mut line = String::new();
            match io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('/') {
                if self.handle_command(&line) {
                    break;
                }
                continue;
            }
            self.send(&line);
        }
    }

    fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("").trim_start_matches('/');
        let rest = parts.next().unwrap_or("").trim();
        match cmd {
            "exit" | "quit" => return true,
            "help" => render::help(),
            "task" => {
                if rest.is_empty() {
                    render::info(&format!("task: {}", self.config.task));
                } else {
                    self.config.task = rest.to_string();
                    render::info("task updated");
                }
            }
            "model" => match rest {
                "" => render::info(&format!("model: {:?}", self.config.model)),
                "table" => {
                    self.config.model = None;
                    render::info("model cleared, using table");
                }
                _ => {
                    self.config.model = Some(rest.to_string());
                    render::info("model updated");
                }
            },
            "temp" => match rest {
                "" => render::info(&format!("temperature: {:?}", self.config.temperature)),
                "table" => {
                    self.config.temperature = None;
                    render::info("temperature cleared, using table");
                }
                _ => match rest.parse::<f32>() {
                    Ok(val) => {
                        self.config.temperature = Some(val);
                        render::info("temperature updated");
                    }
                    Err(_) => render::error("invalid temperature"),
                },
            },
            "system" => {
                if rest.is_empty() {
                    render::info(&format!("system prompt: {:?}", self.config.system_prompt));
                } else {
                    self.config.system_prompt = Some(rest.to_string());
                    render::info("system prompt updated");
                }
            }
            "profile" => {
                if rest.is_empty() {
                    render::error("usage: /profile <default|cost-optimized|premium>");
                } else {
                    match self.client.set_profile(rest) {
                        Ok(source) => render::info(&format!("router now using {}", source)),
                        Err(err) => render::error(&err),
                    }
                }
            }
            "tasks" => match self.client.config() {
                Ok(view) => render::table(&view),
                Err(err) => render::error(&err),
            },
            "debug" => {
                if rest.is_empty() {
                    self.config.debug = !self.config.debug;
                    render::info(&format!("debug: {}", self.config.debug));
                } else if let Some(flag) = parse_on_off(rest) {
                    self.config.debug = flag;
                    render::info(&format!("debug: {}", self.config.debug));
                } else {
                    render::error("invalid debug flag");
                }
            }
            "health" => match self.client.health() {
                Ok(value) => render::info(&value.to_string()),
                Err(err) => render::error(&err),
            },
            "history" => render::history(&self.history),
            "reset" => {
                self.history.clear();
                render::info("history cleared");
            }
            "config" => render::config(&self.config),
            _ => render::info("unknown command, type /help"),
        }
        false
    }

    fn send(&mut self, line: &str) {
        self.history.push(ChatMessage {
            role: "user".to_string(),
            content: line.to_string(),
        });

        let mut messages = Vec::with_capacity(self.history.len() + 1);
        if let Some(system) = &self.config.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.extend(self.history.iter().cloned());

        let req = InferRequest {
            task: self.config.task.clone(),
            messages,
            model: self.config.model.clone(),
            temperature: self.config.temperature,
        };

        match self.client.infer(&req) {
            Ok(resp) => {
                if let Some(content) = resp.content() {
                    self.history.push(ChatMessage {
                        role: "assistant".to_string(),
                        content: content.to_string(),
                    });
                }
                render::response(&resp, self.config.debug);
            }
            Err(err) => render::error(&err),
        }
    }
}

fn parse_on_off(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
