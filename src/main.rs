use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::str::FromStr;

use wellrs::config::AppConfig;
use wellrs::database::{Database, DatabaseError};
use wellrs::error::WellnessError;
use wellrs::display;
use wellrs::export::{export_report, ExportFormat, WellnessReport};
use wellrs::import::csv::CsvImporter;
use wellrs::insight::InsightEngine;
use wellrs::logging::{init_logging, LogLevel};
use wellrs::models::{HealthRecord, Mood};

/// WellRS - Personal Wellness Tracking CLI
///
/// Logs daily self-reported health metrics and produces rule-derived
/// insights, acute warnings, and action plans from them.
#[derive(Parser)]
#[command(name = "wellrs")]
#[command(version = "0.1.0")]
#[command(about = "Personal wellness tracking and insight CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log today's health entry
    Log {
        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Resting heart rate in BPM
        #[arg(long)]
        heart_rate: Option<f64>,

        /// Sleep duration in hours
        #[arg(long)]
        sleep: Option<f64>,

        /// Water intake in glasses
        #[arg(long)]
        water: Option<u8>,

        /// Stress level on a 1-10 scale
        #[arg(long)]
        stress: Option<u8>,

        /// Physical activity in minutes
        #[arg(long)]
        activity: Option<u16>,

        /// Mood (happy, neutral, sad, anxious, energetic, tired)
        #[arg(long)]
        mood: Option<String>,
    },

    /// Import records from a CSV file
    Import {
        /// Input file path
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List recent records
    List {
        /// Number of recent records to show
        #[arg(short, long, default_value = "14")]
        limit: usize,
    },

    /// Generate the full health insight
    Insight {
        /// Include the baseline comparison when enough history exists
        #[arg(long)]
        baseline: bool,
    },

    /// Check the last 3 days for acute warnings
    Warnings,

    /// Ask a free-text question about your data
    Ask {
        /// The question
        question: Vec<String>,
    },

    /// Export records and insight to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (json, csv, text)
        #[arg(short = 'f', long, default_value = "text")]
        format: String,
    },

    /// Inspect or initialize configuration
    Config {
        /// Print the active configuration
        #[arg(short, long)]
        list: bool,

        /// Print the config file path
        #[arg(long)]
        path: bool,

        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load_or_default(&config_path)?;

    if cli.verbose > 0 {
        config.logging.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Log {
            date,
            heart_rate,
            sleep,
            water,
            stress,
            activity,
            mood,
        } => {
            let recorded_at = match date {
                Some(text) => {
                    let date = NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                        .with_context(|| format!("Invalid date: {}", text))?;
                    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"))
                }
                None => Utc::now(),
            };

            let mut record = HealthRecord::new(recorded_at);
            record.heart_rate = heart_rate;
            record.sleep_duration = sleep;
            record.water_intake = water;
            record.stress_level = stress;
            record.activity_level = activity;
            record.mood = match mood {
                Some(text) => Some(Mood::from_str(&text).map_err(anyhow::Error::msg)?),
                None => None,
            };

            let db = open_database(&config)?;
            match db.insert_record(&record) {
                Ok(()) => println!(
                    "{}",
                    format!("✓ Entri {} tersimpan", recorded_at.format("%Y-%m-%d")).green()
                ),
                Err(e @ DatabaseError::DuplicateDay(_)) => {
                    println!("{}", WellnessError::from(e).user_message().yellow());
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Import { file } => {
            println!("{}", "Mengimpor catatan...".cyan().bold());
            let summary = CsvImporter::new()
                .import_file(&file)
                .with_context(|| format!("Failed to import {}", file.display()))?;

            let db = open_database(&config)?;
            let mut inserted = 0;
            let mut duplicates = 0;
            for record in &summary.records {
                match db.insert_record(record) {
                    Ok(()) => inserted += 1,
                    Err(DatabaseError::DuplicateDay(_)) => duplicates += 1,
                    Err(e) => return Err(e.into()),
                }
            }

            println!("  Tersimpan: {}", inserted);
            if duplicates > 0 {
                println!("  Dilewati (hari duplikat): {}", duplicates);
            }
            for error in &summary.row_errors {
                println!(
                    "  {}",
                    format!("Baris {} ditolak: {}", error.line, error.reason).yellow()
                );
            }
            println!("{}", "✓ Impor selesai".green());
        }

        Commands::List { limit } => {
            let db = open_database(&config)?;
            let records = db.fetch_recent(limit)?;
            if records.is_empty() {
                println!("Belum ada catatan. Mulai dengan `wellrs log`.");
            } else {
                println!("{}", display::records_table(&records));
            }
        }

        Commands::Insight { baseline } => {
            let db = open_database(&config)?;
            let records = db.fetch_all()?;
            let engine = InsightEngine::with_thresholds(config.thresholds.clone());

            match engine.generate_insight(&records) {
                Some(insight) => {
                    print!("{}", display::render_insight(&insight));
                    if baseline {
                        match engine.compare_to_baseline(&records) {
                            Some(comparison) => {
                                println!();
                                print!("{}", display::render_baseline(&comparison));
                            }
                            None => println!(
                                "\n{}",
                                "Baseline belum tersedia (butuh minimal 10 catatan).".dimmed()
                            ),
                        }
                    }
                }
                None => println!(
                    "Belum ada data untuk dianalisis. Tambahkan entri dengan `wellrs log`."
                ),
            }
        }

        Commands::Warnings => {
            let db = open_database(&config)?;
            let records = db.fetch_all()?;
            let engine = InsightEngine::with_thresholds(config.thresholds.clone());
            print!("{}", display::render_warnings(&engine.detect_warnings(&records)));
        }

        Commands::Ask { question } => {
            let question = question.join(" ");
            let db = open_database(&config)?;
            let records = db.fetch_all()?;
            let engine = InsightEngine::with_thresholds(config.thresholds.clone());
            println!("{}", engine.answer_question(&question, &records));
        }

        Commands::Export { output, format } => {
            let format = ExportFormat::from_str(&format)?;
            let db = open_database(&config)?;
            let records = db.fetch_all()?;
            let engine = InsightEngine::with_thresholds(config.thresholds.clone());

            let report = WellnessReport::build(&records, &engine);
            export_report(&report, &output, format)
                .with_context(|| format!("Failed to export to {}", output.display()))?;
            println!(
                "{}",
                format!("✓ Laporan tersimpan di {}", output.display()).green()
            );
        }

        Commands::Config { list, path, init } => {
            if path {
                println!("{}", config_path.display());
            }
            if init {
                let mut fresh = AppConfig::default();
                fresh.save(&config_path)?;
                println!(
                    "{}",
                    format!("✓ Konfigurasi default ditulis ke {}", config_path.display()).green()
                );
            }
            if list || (!path && !init) {
                let rendered =
                    toml::to_string_pretty(&config).context("Failed to render config")?;
                println!("{}", rendered);
            }
        }
    }

    Ok(())
}

fn open_database(config: &AppConfig) -> Result<Database> {
    std::fs::create_dir_all(&config.settings.data_dir).with_context(|| {
        format!(
            "Failed to create data dir {}",
            config.settings.data_dir.display()
        )
    })?;
    let path = config.database_path();
    Database::new(&path).with_context(|| format!("Failed to open database {}", path.display()))
}
