use clap::{Args, Parser, Subcommand};
use patient_visits::api::{self, AppState};
use patient_visits::cli::{self as prog_cli, Command};
use patient_visits::config::AppConfig;
use patient_visits::errors::ServiceError;
use patient_visits::query::{self, ExportCriteria, FilterCriteria, telemetry};
use patient_visits::{PatientVisits, logger};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "patient-visits", version, about = "Patient visit query and export service", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, help = "Path to a config file (TOML). If omitted, ./patient-visits.toml and env are used.")]
    config: Option<PathBuf>,
    /// CSV data file; overrides config. Without one the bundled sample is served.
    #[arg(long)]
    data: Option<PathBuf>,
    #[arg(long, help = "Log level: error|warn|info|debug|trace")]
    log_level: Option<String>,
    #[arg(long, help = "Directory for app.log and audit.log")]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long = "diagnosis", help = "Accepted diagnosis; repeat for OR")]
    diagnoses: Vec<String>,
    #[arg(long = "gender", help = "Accepted gender; repeat for OR")]
    genders: Vec<String>,
    #[arg(long = "visit-type", help = "Accepted visit type; repeat for OR")]
    visit_types: Vec<String>,
    #[arg(long, help = "Inclusive lower bound, YYYY-MM-DD")]
    from_date: Option<String>,
    #[arg(long, help = "Inclusive upper bound, YYYY-MM-DD")]
    to_date: Option<String>,
}

impl FilterArgs {
    // Same parsing rules as the HTTP query string.
    fn into_criteria(self) -> Result<FilterCriteria, ServiceError> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        pairs.extend(self.diagnoses.into_iter().map(|v| ("diagnosis[]", v)));
        pairs.extend(self.genders.into_iter().map(|v| ("gender[]", v)));
        pairs.extend(self.visit_types.into_iter().map(|v| ("visit_type[]", v)));
        if let Some(v) = self.from_date { pairs.push(("from_date", v)); }
        if let Some(v) = self.to_date { pairs.push(("to_date", v)); }
        query::parse_filter_params(pairs)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Serve the HTTP API")]
    Serve {
        #[arg(long, help = "Address to bind, e.g. 127.0.0.1:8000")]
        bind: Option<String>,
    },
    #[command(about = "Print records matching the filters")]
    Query {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, help = "pretty|json|plain")]
        output: Option<String>,
    },
    #[command(about = "Export matching records to a file (single value per filter)")]
    Export {
        #[arg(long)]
        diagnosis: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long = "visit-type")]
        visit_type: Option<String>,
        #[arg(long, short = 'o', default_value = "patient_data.csv")]
        out: PathBuf,
        #[arg(long, help = "pretty|json|plain")]
        output: Option<String>,
    },
    #[command(about = "Print distinct diagnosis, gender and visit type values")]
    Options {
        #[arg(long, help = "pretty|json|plain")]
        output: Option<String>,
    },
    #[command(about = "Print per-diagnosis visit metrics for the filtered records")]
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, help = "pretty|json|plain")]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ServiceError> {
    // Precedence: CLI > config files > env > defaults
    let mut cfg = AppConfig::load(cli.config.as_deref())?;
    if cli.data.is_some() { cfg.data_file = cli.data; }
    if cli.log_level.is_some() { cfg.log_level = cli.log_level; }
    if cli.log_dir.is_some() { cfg.log_dir = cli.log_dir; }

    let serving = matches!(cli.command, Commands::Serve { .. });
    logger::configure_from(&cfg, serving)?;
    if let Some(ms) = cfg.slow_query_ms {
        telemetry::set_slow_query_ms(ms);
    }
    let store = cfg.open_store()?;

    let (cmd, output) = match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| cfg.bind_addr().to_string());
            return api::serve(&bind, AppState::new(store)).await;
        }
        Commands::Query { filter, output } => {
            (Command::Query { criteria: filter.into_criteria()? }, output)
        }
        Commands::Export { diagnosis, gender, visit_type, out, output } => {
            let criteria = ExportCriteria {
                diagnosis: diagnosis.filter(|v| !v.trim().is_empty()),
                gender: gender.filter(|v| !v.trim().is_empty()),
                visit_type: visit_type.filter(|v| !v.trim().is_empty()),
            };
            (Command::Export { criteria, file: out }, output)
        }
        Commands::Options { output } => (Command::Options, output),
        Commands::Summary { filter, output } => {
            (Command::Summary { criteria: filter.into_criteria()? }, output)
        }
    };
    let mode = prog_cli::parse_output_mode(output.as_deref())?;
    let service = PatientVisits::new(store);
    let stdout = std::io::stdout();
    prog_cli::run_with_format(&service, cmd, mode, &mut stdout.lock())
}
