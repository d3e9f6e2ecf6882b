// Terminal UI utilities

use colored::Colorize;

use crate::domain::DigestChange;

pub fn print_header(title: &str) {
    println!();
    println!(
        "{}",
        "╔════════════════════════════════════════════════════════════╗".bright_blue()
    );
    println!("{}", format!("║  {:<58}║", title).bright_blue());
    println!(
        "{}",
        "╚════════════════════════════════════════════════════════════╝".bright_blue()
    );
    println!();
}

/// One line per rewritten reference: `buildah:0.1  sha256:aaaa… → sha256:bbbb…`
pub fn print_change(change: &DigestChange) {
    println!(
        "   {} {}  {} → {}",
        "↻".bright_cyan(),
        change.key.to_string().bold(),
        change.old.short().dimmed(),
        change.new.short().bright_green()
    );
}

pub fn print_success(message: &str) {
    println!("{}", format!("✅ {}", message).bright_green().bold());
}

pub fn print_error(message: &str) {
    eprintln!("{}", format!("❌ {}", message).bright_red().bold());
}

pub fn print_info(message: &str) {
    println!("{}", format!("ℹ️  {}", message).bright_cyan());
}

pub fn print_warning(message: &str) {
    println!("{}", format!("⚠️  {}", message).bright_yellow());
}
