use callplan::{CallplanConfig, CallplanDatabase, StepOutcome, TableOutcome};
use clap::Parser;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::Level;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// configuration file path, by default $HOME/.callplan/callplan.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    /// Datastore file path, overriding the configured data directory
    #[clap(long)]
    db: Option<String>,

    /// Output the provisioning report as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Tabled)]
struct OutcomeRow {
    table: &'static str,
    drop: String,
    create: String,
}

fn step_cell(step: &StepOutcome) -> String {
    match step {
        StepOutcome::Ok => "ok".to_string(),
        StepOutcome::Failed(msg) => format!("failed: {msg}"),
    }
}

fn outcome_row(outcome: &TableOutcome) -> OutcomeRow {
    OutcomeRow {
        table: outcome.table,
        drop: step_cell(&outcome.drop),
        create: step_cell(&outcome.create),
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            // filter spans/events with level TRACE or higher.
            .with_max_level(Level::INFO)
            .init();
    }

    // A store that cannot be opened aborts before any provisioning.
    let db = match &cli.db {
        Some(path) => CallplanDatabase::open(path),
        None => match CallplanConfig::new(&cli.config) {
            Ok(config) => CallplanDatabase::open_in_dir(&config.data_dir),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
    };
    let db = match db {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let report = db.provision();

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("{e}"),
        }
    } else {
        let rows: Vec<OutcomeRow> = report.outcomes.iter().map(outcome_row).collect();
        println!("{}", Table::new(rows).with(Style::markdown()));
    }

    // Statement failures are diagnostics, not exit codes: the run itself
    // completed, and the report says which tables are stale.
    if !report.is_success() {
        eprintln!(
            "{} table(s) did not reach their seeded state",
            report.failures().len()
        );
    }
}
