use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use conan_lint::report::{render_json, render_text, summary, FileReport};
use conan_lint::{collect_recipe_files, fix_path, lint_path, load_config, LintResult, RulesConfig};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "conan-lint", about = "Lint Conan recipe files")]
struct Cli {
    /// Recipe files or directories to search for conanfile.py.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// JSON rules configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Rewrite files with available fixes applied.
    #[arg(long)]
    fix: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::from(2);
            }
        },
        None => RulesConfig::default(),
    };

    let files = match collect_recipe_files(&cli.paths) {
        Ok(files) => files,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };
    info!(count = files.len(), "linting recipes");

    let mut results: Vec<(PathBuf, LintResult)> = Vec::with_capacity(files.len());
    let mut failures = 0;
    for file in files {
        let outcome = if cli.fix {
            fix_path(&file, &config)
        } else {
            lint_path(&file, &config)
        };
        match outcome {
            Ok(result) => results.push((file, result)),
            Err(err) => {
                warn!(path = %file.display(), "skipping file");
                eprintln!("error: {err}");
                failures += 1;
            }
        }
    }

    let reports: Vec<FileReport> = results
        .iter()
        .map(|(path, result)| FileReport::new(path, result))
        .collect();

    match cli.format {
        Format::Text => {
            for report in &reports {
                print!("{}", render_text(report));
            }
            let errors = results.iter().map(|(_, r)| r.error_count()).sum();
            let warnings = results.iter().map(|(_, r)| r.warning_count()).sum();
            eprintln!("{}", summary(results.len(), errors, warnings, failures));
        }
        Format::Json => match render_json(&reports) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::from(2);
            }
        },
    }

    if failures > 0 {
        ExitCode::from(2)
    } else if results.iter().any(|(_, r)| !r.is_clean()) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
