use std::io::{self, Write};

use crate::models::{CLIConfig, ChatMessage, ConfigView, InferResponse};

pub fn banner(cfg: &CLIConfig) {
    println!("Infer Router Debug CLI");
    println!("API: {}", cfg.base_url);
    println!(
        "Task: {}  Model: {}",
        cfg.task,
        cfg.model.as_deref().unwrap_or("(table)")
    );
    println!("Type /help for commands.");
}

pub fn prompt(task: &str) {
    print!("{}> ", task);
    let _ = io::stdout().flush();
}

pub fn help() {
    println!("Commands:");
    println!("  /help                  Show commands");
    println!("  /exit | /quit          Exit");
    println!("  /task <kind>           Set task kind");
    println!("  /model <id|table>      Force a model or go back to the table");
    println!("  /temp <float|table>    Override temperature");
    println!("  /system <prompt>       Set system prompt");
    println!("  /profile <name>        Swap the router's preset table");
    println!("  /tasks                 Show the router's active table");
    println!("  /debug [on|off]        Toggle raw response output");
    println!("  /health                Check the router");
    println!("  /history               Show chat history");
    println!("  /reset                 Clear chat history");
    println!("  /config                Show current config");
}

pub fn response(resp: &InferResponse, debug: bool) {
    if !resp.success {
        let detail = match (resp.status, resp.attempt.as_deref()) {
            (Some(status), Some(attempt)) => format!(" ({} attempt, status {})", attempt, status),
            (None, Some(attempt)) => format!(" ({} attempt)", attempt),
            _ => String::new(),
        };
        println!(
            "error{}: {}",
            detail,
            resp.error.as_deref().unwrap_or("unknown error")
        );
        return;
    }
    if resp.attempt.as_deref() == Some("fallback") {
        println!(
            "(served by fallback model {})",
            resp.model.as_deref().unwrap_or("?")
        );
    }
    println!("assistant> {}", resp.content().unwrap_or(""));
    if debug {
        if let Some(raw) = &resp.response {
            println!("raw: {}", raw);
        }
    }
}

pub fn table(view: &ConfigView) {
    println!("table: {}", view.source);
    for (task, spec) in &view.tasks {
        println!(
            "  {:<26} {:<28} -> {:<28} max={:<6} temp={:.1} effort={}",
            task,
            spec.primary_model,
            spec.fallback_model.as_deref().unwrap_or("-"),
            spec.max_tokens,
            spec.temperature,
            spec.reasoning_effort.as_deref().unwrap_or("-")
        );
    }
}

pub fn config(cfg: &CLIConfig) {
    println!("config:");
    println!("  base: {}", cfg.base_url);
    println!("  task: {}", cfg.task);
    println!("  model: {}", cfg.model.as_deref().unwrap_or("(table)"));
    match cfg.temperature {
        Some(temp) => println!("  temp: {:.2}", temp),
        None => println!("  temp: (table)"),
    }
    println!("  debug: {}", cfg.debug);
    if let Some(system) = &cfg.system_prompt {
        println!("  system: {}", system);
    }
}

pub fn history(items: &[ChatMessage]) {
    if items.is_empty() {
        println!("no history");
        return;
    }
    for msg in items {
        println!("{}> {}", msg.role, msg.content);
    }
}

pub fn info(msg: &str) {
    println!("{}", msg);
}

pub fn error(msg: &str) {
    eprintln!("error: {}", msg);
}
