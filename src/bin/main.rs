//! Prism CLI - Transform query results and inspect dialect primitives
//!
//! Usage:
//!   prism transform <request.json> [--compact] [--pretty]
//!   prism primitives --column <expr> [--dialect <dialect>] [--granularity <g>]
//!   prism dialects
//!
//! Examples:
//!   prism transform result.json --compact
//!   prism primitives --dialect postgres --column orders.created_at --granularity week
//!   prism primitives --column created_at --granularity day --from 2021-01-01 --to 2021-01-03

use clap::{Parser, Subcommand};
use prism::config::{parse_filter, Settings};
use prism::model::ResultType;
use prism::sql::{time_series, Dialect, Granularity, MatchKind, ParamCast, SqlDialect};
use prism::transform::{TransformInput, TransformOptions, Transformer};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "prism")]
#[command(about = "Prism - SQL primitives and result shaping for analytical queries")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to PRISM_CONFIG, ./prism.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a result request (or an array of them) into response JSON
    Transform {
        /// Path to the request JSON file
        file: PathBuf,

        /// Emit the compact shape when a request does not name one
        #[arg(long)]
        compact: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Render every dialect primitive for a column expression
    Primitives {
        /// SQL dialect (defaults to the configured one)
        #[arg(short, long)]
        dialect: Option<String>,

        /// Column expression to render primitives for
        #[arg(short, long)]
        column: String,

        /// Truncation granularity
        #[arg(short, long)]
        granularity: Option<String>,

        /// Timezone (defaults to the configured one)
        #[arg(short, long)]
        timezone: Option<String>,

        /// Start of a date series (requires --granularity and --to)
        #[arg(long)]
        from: Option<String>,

        /// End of a date series
        #[arg(long)]
        to: Option<String>,
    },

    /// List supported SQL dialects
    Dialects,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&settings) {
        eprintln!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    match cli.command {
        Commands::Transform {
            file,
            compact,
            pretty,
        } => cmd_transform(&settings, file, compact, pretty),
        Commands::Primitives {
            dialect,
            column,
            granularity,
            timezone,
            from,
            to,
        } => cmd_primitives(&settings, dialect, column, granularity, timezone, from, to),
        Commands::Dialects => cmd_dialects(&settings),
    }
}

fn init_tracing(settings: &Settings) -> prism::Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => parse_filter(&directives)?,
        Err(_) => settings.logging.env_filter()?,
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn cmd_transform(settings: &Settings, file: PathBuf, compact: bool, pretty: bool) -> ExitCode {
    let source = match fs::read_to_string(&file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let input: TransformInput = match serde_json::from_str(&source) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Invalid request '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut options = TransformOptions::from(&settings.transform);
    if compact {
        options.result_type = ResultType::Compact;
    }

    let output = match Transformer::new(options).transform_input(&input) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Transform error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    };
    match json {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_primitives(
    settings: &Settings,
    dialect: Option<String>,
    column: String,
    granularity: Option<String>,
    timezone: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> ExitCode {
    match render_primitives(settings, dialect, &column, granularity, timezone, from, to) {
        Ok(lines) => {
            for (name, sql) in lines {
                println!("{:<24} {}", name, sql);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn render_primitives(
    settings: &Settings,
    dialect: Option<String>,
    column: &str,
    granularity: Option<String>,
    timezone: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> prism::Result<Vec<(&'static str, String)>> {
    let dialect: Dialect = match dialect {
        Some(name) => name.parse()?,
        None => settings.dialect.default,
    };
    let timezone = match timezone {
        Some(tz) => tz,
        None => settings.dialect.resolved_timezone()?,
    };
    let param = dialect.param_placeholder(1);

    let mut lines = vec![
        ("dialect", dialect.name().to_string()),
        ("convert_timezone", dialect.convert_timezone(column, &timezone)?),
        ("cast_timestamp_literal", dialect.cast_timestamp_literal(&param)),
        ("cast_date_time", dialect.cast_date_time(column)),
        ("timestamp_parse_format", dialect.timestamp_parse_format().to_string()),
        ("current_unix_timestamp", dialect.current_unix_timestamp()),
        ("escape_identifier", dialect.escape_identifier(column)),
        (
            "concat_strings",
            dialect.concat_strings(&[column.to_string(), "'-'".to_string()]),
        ),
        (
            "boolean_indicator",
            dialect.boolean_indicator(&format!("{} IS NOT NULL", column)),
        ),
        ("param_placeholder", param.clone()),
        (
            "like_ignore_case",
            dialect.like_ignore_case(column, false, MatchKind::Contains, &param),
        ),
        ("cast_parameter", dialect.cast_parameter(&param, ParamCast::Number)),
    ];

    if let Some(granularity) = granularity {
        let granularity: Granularity = granularity.parse()?;
        lines.insert(
            1,
            ("truncate_to_granularity", dialect.truncate_to_granularity(granularity, column)),
        );
        if let (Some(from), Some(to)) = (from, to) {
            let ranges = time_series(granularity, &from, &to)?;
            lines.push(("generate_date_series", dialect.generate_date_series(&ranges)?));
        }
    }

    Ok(lines)
}

fn cmd_dialects(settings: &Settings) -> ExitCode {
    for dialect in Dialect::all() {
        let marker = if *dialect == settings.dialect.default {
            " (default)"
        } else {
            ""
        };
        println!("{}{}", dialect, marker);
    }
    ExitCode::SUCCESS
}
