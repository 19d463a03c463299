use clap::{Parser, ValueEnum};
use keisei::prelude::*;
use std::fs;
use std::time::Instant;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeCli {
    Designer,
    Edit,
    Readonly,
}

/// A dynamic form migration and evaluation engine CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the form markup JSON file
    markup_path: String,

    /// Optional path to a data JSON file to resolve the form against
    data_path: Option<String>,

    /// The form mode to resolve in
    #[arg(short, long, value_enum, default_value = "edit")]
    mode: ModeCli,

    /// Only migrate; skip resolution and rendering
    #[arg(long)]
    migrate_only: bool,
}

fn main() {
    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let markup_json = fs::read_to_string(&cli.markup_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read markup file '{}': {}",
            &cli.markup_path, e
        ))
    });
    let data = match &cli.data_path {
        Some(data_path) => {
            let raw = fs::read_to_string(data_path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read data file '{}': {}", data_path, e))
            });
            serde_json::from_str(&raw)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse data JSON: {}", e)))
        }
        None => {
            println!("No data file provided. Resolving against an empty record.");
            serde_json::Value::Null
        }
    };
    let load_duration = load_start.elapsed();

    // --- 2. Parsing ---
    let markup = FormMarkup::from_json(&markup_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse markup JSON: {}", e)));
    let component_count = markup.len();

    // --- 3. Migration ---
    println!("\nStarting markup migration ({} components)...", component_count);
    let registry = ComponentRegistry::with_defaults();
    let migrate_start = Instant::now();
    let report = migrate_markup(&registry, markup);
    let migrate_duration = migrate_start.elapsed();

    println!(
        "Migration finished: {} components carried, {} failed, in {:?}",
        report.markup.len(),
        report.failures.len(),
        migrate_duration
    );
    for failure in &report.failures {
        eprintln!(
            "  -> {} ({}): {}",
            failure.component_id, failure.component_type, failure.error
        );
    }

    if cli.migrate_only {
        println!(
            "\n{}",
            report
                .markup
                .to_json()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize markup: {}", e)))
        );
        return;
    }

    // --- 4. Resolution and Rendering ---
    let mode = match cli.mode {
        ModeCli::Designer => FormMode::Designer,
        ModeCli::Edit => FormMode::Edit,
        ModeCli::Readonly => FormMode::Readonly,
    };
    let ctx = FormContext::new(data).with_mode(mode);

    println!("\nResolving form in {} mode...", mode.as_str());
    let resolve_start = Instant::now();
    let mut cache = ResolveCache::new();
    let output = render_form(&registry, &mut cache, report.markup, &ctx);
    let resolve_duration = resolve_start.elapsed();

    println!("\nRendered Components:");
    if output.components.is_empty() {
        println!("  (none visible)");
    }
    for component in &output.components {
        println!("  {} [{}]", component.id, component.widget);
        println!("    {}", component.props);
    }

    // --- 5. Summary ---
    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("File Loading:   {:?}", load_duration);
    println!("Migration:      {:?}", migrate_duration);
    println!("Resolution:     {:?}", resolve_duration);
    println!("---------------------------");
    println!("Total:          {:?}", total_duration);
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
