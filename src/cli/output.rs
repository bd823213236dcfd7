use crate::checker::{Rejection, ReloadReport};
use crate::CheckedLine;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    source: &'a str,
    entries: &'a [CheckedLine],
    error_count: usize,
}

#[derive(Debug, Serialize)]
struct JsonRejection<'a> {
    source: &'a str,
    line: usize,
    message: &'a str,
}

/// Number of entries carrying a diagnostic.
pub fn error_count(lines: &[CheckedLine]) -> usize {
    lines.iter().filter(|l| !l.diagnostic.is_empty()).count()
}

pub fn print_results(
    source: &str,
    lines: &[CheckedLine],
    colored_output: bool,
    format: OutputFormat,
) -> serde_json::Result<()> {
    match format {
        OutputFormat::Text => {
            print_text_results(source, lines, colored_output);
            Ok(())
        }
        OutputFormat::Json => print_json_results(source, lines),
    }
}

/// Canonical names with their diagnostics underneath.
pub fn render_text(source: &str, lines: &[CheckedLine], colored_output: bool) -> String {
    let mut out = String::new();

    if colored_output {
        out.push_str(&format!("{}\n", source.bold().underline()));
    } else {
        out.push_str(&format!("{}\n", source));
    }

    for entry in lines.iter().filter(|l| !l.canonical.is_empty()) {
        let line_info = format!("{:>4}", entry.line);

        if colored_output {
            out.push_str(&format!("{}  {}\n", line_info.blue().bold(), entry.canonical));
            if !entry.diagnostic.is_empty() {
                out.push_str(&format!(
                    "      {} {}\n",
                    "→".dimmed(),
                    entry.diagnostic.red()
                ));
            }
        } else {
            out.push_str(&format!("{}  {}\n", line_info, entry.canonical));
            if !entry.diagnostic.is_empty() {
                out.push_str(&format!("      → {}\n", entry.diagnostic));
            }
        }
    }

    if error_count(lines) == 0 {
        if colored_output {
            out.push_str(&format!("{}\n", "All good.".green().bold()));
        } else {
            out.push_str("All good.\n");
        }
    }

    out
}

fn print_text_results(source: &str, lines: &[CheckedLine], colored_output: bool) {
    println!();
    print!("{}", render_text(source, lines, colored_output));
}

fn print_json_results(source: &str, lines: &[CheckedLine]) -> serde_json::Result<()> {
    let output = JsonOutput {
        source,
        entries: lines,
        error_count: error_count(lines),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// A rejected batch gets its single message on stderr.
pub fn print_rejection(
    source: &str,
    rejection: &Rejection,
    colored_output: bool,
    format: OutputFormat,
) -> serde_json::Result<()> {
    match format {
        OutputFormat::Json => {
            let output = JsonRejection {
                source,
                line: rejection.line_number,
                message: &rejection.message,
            };
            eprintln!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text if colored_output => {
            eprintln!("{} {}: {}", "✗".red().bold(), source.bold(), rejection.message);
        }
        OutputFormat::Text => {
            eprintln!("✗ {}: {}", source, rejection.message);
        }
    }
    Ok(())
}

pub fn print_check_summary(total_errors: usize, sources: usize, colored: bool) {
    println!();
    if total_errors == 0 {
        if colored {
            println!("{}", "✓ All names are registered!".green().bold());
        } else {
            println!("✓ All names are registered!");
        }
    } else {
        let error_word = if total_errors == 1 { "problem" } else { "problems" };
        let source_word = if sources == 1 { "input" } else { "inputs" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_errors.to_string().red().bold(),
                error_word,
                sources,
                source_word
            );
        } else {
            println!(
                "✗ {} {} found in {} {}",
                total_errors, error_word, sources, source_word
            );
        }
    }
}

pub fn print_reload_report(report: &ReloadReport, colored: bool) {
    for warning in &report.warnings {
        if colored {
            eprintln!("{} {}", "Warning:".yellow().bold(), warning);
        } else {
            eprintln!("Warning: {}", warning);
        }
    }

    if report.reloaded {
        let summary = format!(
            "Loaded {} name pairs ({} distinct names)",
            report.pairs, report.words
        );
        if colored {
            println!("{} {}", "✓".green().bold(), summary);
        } else {
            println!("✓ {}", summary);
        }
    } else if colored {
        println!("{}", "Name database unchanged.".yellow());
    } else {
        println!("Name database unchanged.");
    }
}
