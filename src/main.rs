use std::path::PathBuf;

use clap::{Parser, ValueEnum};

mod ingest;
mod models;
mod report;
mod stats;

#[derive(Parser)]
#[command(name = "gradesheet-summary")]
#[command(about = "Validate and summarize an academic gradesheet", long_about = None)]
struct Cli {
    /// Path to the gradesheet CSV
    input: PathBuf,
    /// Also write a structured report next to the input file
    #[arg(long, value_enum)]
    export: Option<ExportFormat>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let ingest::Roster {
        students,
        discrepancies,
    } = ingest::load_roster(&cli.input)?;

    for discrepancy in &discrepancies {
        eprintln!(
            "Mismatch detected for EmplID {}. Expected: {:.2}, Found: {:.2}.",
            discrepancy.empl_id, discrepancy.expected_total, discrepancy.actual_total
        );
    }

    let summary = report::build_report(&students, discrepancies);
    print!("{}", report::render_console(&summary));

    if let Some(ExportFormat::Json) = cli.export {
        let out = report::export_path(&cli.input);
        report::write_json(&summary, &out)?;
        println!("\nReport exported to {}", out.display());
    }

    Ok(())
}
