//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::supervisor::ProcessConfig;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print the effective restart policy as a table
pub fn print_supervisor_table(process: &ProcessConfig) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Option").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    let on_off = |flag: bool| if flag { "on".to_string() } else { "off".to_string() };

    table.add_row(vec!["script".to_string(), process.script.clone()]);
    table.add_row(vec!["args".to_string(), process.args.join(" ")]);
    table.add_row(vec!["instances".to_string(), process.instances.to_string()]);
    table.add_row(vec!["autorestart".to_string(), on_off(process.autorestart)]);
    table.add_row(vec!["watch".to_string(), on_off(process.watch)]);
    table.add_row(vec![
        "max_memory_restart".to_string(),
        process
            .max_memory_restart
            .clone()
            .unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec![
        "restart_delay".to_string(),
        format!("{}ms", process.restart_delay),
    ]);
    table.add_row(vec![
        "max_restarts".to_string(),
        process.max_restarts.to_string(),
    ]);
    table.add_row(vec!["wait_ready".to_string(), on_off(process.wait_ready)]);
    table.add_row(vec![
        "listen_timeout".to_string(),
        format!("{}ms", process.listen_timeout),
    ]);
    table.add_row(vec![
        "kill_timeout".to_string(),
        format!("{}ms", process.kill_timeout),
    ]);

    println!("{table}");
}
