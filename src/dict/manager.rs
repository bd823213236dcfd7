use crate::checker::dictionary::{FstDictionary, WordDictionary};
use crate::checker::RosterValidator;
use crate::cli::output::print_reload_report;
use crate::Config;
use anyhow::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::time::Duration;

/// Rebuild the name database from the configured roster source.
pub fn reload(config: &Config, colored: bool) -> Result<()> {
    let store = config.store()?;
    let source = config.roster_source();
    // Start from an empty dictionary: the one on disk may be corrupt.
    let mut validator = RosterValidator::new(
        store.load_pairs().unwrap_or_default(),
        FstDictionary::from_vocabulary(&[])?,
        config.delimiter,
    )
    .with_max_suggestions(config.max_suggestions);

    println!(
        "{} name pairings from {}...",
        "Reloading".cyan().bold(),
        source.path().display().to_string().yellow()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Building dictionary...");

    let report = validator.reload_data(&source, &store);
    pb.finish_and_clear();

    print_reload_report(&report, colored);

    if report.reloaded {
        println!(
            "Pairings: {}",
            store.pairs_path().display().to_string().dimmed()
        );
        println!(
            "Dictionary: {}",
            store.dictionary_path().display().to_string().dimmed()
        );
    }

    Ok(())
}

pub fn show_info(config: &Config) -> Result<()> {
    let store = config.store()?;
    let dict_path = store.dictionary_path();

    if !dict_path.exists() {
        println!("{} No name dictionary built yet.", "✗".red().bold());
        println!("Run {} to build it.", "rosterchk reload".cyan());
        return Ok(());
    }

    let metadata = fs::metadata(dict_path)?;
    let roster = store.load_pairs_or_default();

    println!("{}", "Name database".bold());
    println!("  Dictionary: {}", dict_path.display());
    println!("  Size: {} KB", metadata.len() / 1024);
    println!("  Format: FST (Finite State Transducer)");

    match store.load_dictionary() {
        Ok(dict) => println!("  Words: {}", dict.len()),
        Err(e) => println!("  {}: {:#}", "Error loading dictionary".red(), e),
    }

    println!("  Pairings: {}", store.pairs_path().display());
    println!("  Registered pairs: {}", roster.len());

    Ok(())
}

/// Print the distinct registered names, one per line.
pub fn list_words(config: &Config) -> Result<()> {
    let roster = config.store()?.load_pairs_or_default();

    if roster.is_empty() {
        println!("{}", "No registered names.".yellow());
        return Ok(());
    }

    for word in roster.unique_words() {
        println!("{}", word);
    }

    Ok(())
}
