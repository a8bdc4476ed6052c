//! qfilter - qualifier filter toolkit
//!
//! Parse qualifier tokens, render the WHERE and ORDER BY clauses a request
//! produces against a configured schema, or run the ad-hoc date and text
//! checks.
//!
//! # Usage
//!
//! ```bash
//! qfilter parse '<11' '!=10.119.24.99' 100
//! qfilter --config flows.toml render --filter 'port_dst=<11' --filter 'port_dst==100' --sort=-seen_at
//! qfilter --config flows.toml render --query 'ip_src=~10.119&sort=%2Bport_dst' --json
//! qfilter date --candidate 2024-06-01T12:00:00 '>2023-01-01T00:00:00'
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qf_core::config::{LogFormat, LoggingConfig, QfConfig};
use qf_filters::{
    is_string_date_qualified, is_string_qualified, parse_qualifier_value, parse_qualifier_values,
    FilterRequest, Schema, DEFAULT_SORT_KEY,
};
use qf_sql::{order_by_clause, Value};

#[derive(Parser)]
#[command(name = "qfilter")]
#[command(author = "qfilter Contributors")]
#[command(version)]
#[command(about = "Qualifier-based filter and sort conditions", long_about = None)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true, env = "QFILTER_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format, overrides the configured one
    #[arg(long, global = true, value_enum)]
    log_format: Option<CliLogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliLogFormat {
    Pretty,
    Json,
}

impl From<CliLogFormat> for LogFormat {
    fn from(val: CliLogFormat) -> Self {
        match val {
            CliLogFormat::Pretty => LogFormat::Pretty,
            CliLogFormat::Json => LogFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show how each token parses
    Parse {
        #[arg(required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Render WHERE and ORDER BY for the configured schema
    Render {
        /// URL query string, e.g. 'port_dst=%3C11&sort=-id'
        #[arg(short, long)]
        query: Option<String>,
        /// Filter token as FIELD=TOKEN (repeatable)
        #[arg(short, long = "filter", value_name = "FIELD=TOKEN", value_parser = parse_filter_arg, allow_hyphen_values = true)]
        filters: Vec<(String, String)>,
        /// Sort token like +name or -id (repeatable)
        #[arg(short, long = "sort", value_name = "TOKEN", allow_hyphen_values = true)]
        sorts: Vec<String>,
        /// Fail on fields the schema does not define instead of ignoring them
        #[arg(long)]
        deny_unknown: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check a date-time against qualifier tokens
    Date {
        #[arg(long)]
        candidate: String,
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Check a text value against qualifier tokens
    Text {
        #[arg(long)]
        candidate: Option<String>,
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = QfConfig::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("failed to load configuration from {}", path.display()),
        None => "failed to load configuration from the environment".to_string(),
    })?;
    let format = cli.log_format.map(LogFormat::from).unwrap_or(config.logging.format);
    init_tracing(&config.logging, format);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &config, &mut out)
}

fn init_tracing(logging: &LoggingConfig, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
    }
}

fn run(command: Commands, config: &QfConfig, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Parse { tokens, json } => parse(&tokens, json, out),
        Commands::Render {
            query,
            filters,
            sorts,
            deny_unknown,
            json,
        } => {
            let schema = Schema::from_config(&config.schema);
            let mut request = FilterRequest::new();
            let mut sort_tokens = Vec::new();
            if let Some(query) = query {
                let parsed = FilterRequest::from_query_str(&query, DEFAULT_SORT_KEY);
                request = parsed.filter;
                sort_tokens = parsed.sort;
            }
            for (field, token) in filters {
                request.add(field, token);
            }
            sort_tokens.extend(sorts);

            if deny_unknown {
                schema.check_fields(&request)?;
            }
            render(&schema, &request, &sort_tokens, json, out)
        }
        Commands::Date { candidate, tokens } => {
            let qualifiers = parse_qualifier_values(&tokens);
            writeln!(out, "{}", is_string_date_qualified(&qualifiers, &candidate))?;
            Ok(())
        }
        Commands::Text { candidate, tokens } => {
            let qualifiers = parse_qualifier_values(&tokens);
            writeln!(out, "{}", is_string_qualified(&qualifiers, candidate.as_deref()))?;
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ParsedToken<'a> {
    token: &'a str,
    qualifier: Option<String>,
    sign: Option<&'static str>,
    value: Option<String>,
}

fn parse(tokens: &[String], json: bool, out: &mut impl Write) -> Result<()> {
    let parsed: Vec<ParsedToken> = tokens
        .iter()
        .map(|token| {
            let qv = parse_qualifier_value(token);
            ParsedToken {
                token,
                qualifier: qv.as_ref().map(|qv| format!("{:?}", qv.qualifier)),
                sign: qv.as_ref().map(|qv| qv.qualifier.sign()),
                value: qv.map(|qv| qv.value),
            }
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &parsed)?;
        writeln!(out)?;
        return Ok(());
    }

    for entry in &parsed {
        match (&entry.qualifier, &entry.value) {
            (Some(qualifier), Some(value)) => writeln!(out, "{:?} => {} {:?}", entry.token, qualifier, value)?,
            _ => writeln!(out, "{:?} => dropped", entry.token)?,
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct Rendered<'a> {
    #[serde(rename = "where")]
    where_clause: &'a str,
    params: &'a [Value],
    order_by: &'a str,
}

fn render(
    schema: &Schema,
    request: &FilterRequest,
    sort_tokens: &[String],
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let fragment = schema.filter(request).where_clause();
    let order_by = order_by_clause(&schema.sort(sort_tokens));

    if json {
        let rendered = Rendered {
            where_clause: &fragment.sql,
            params: &fragment.params,
            order_by: &order_by,
        };
        serde_json::to_writer_pretty(&mut *out, &rendered)?;
        writeln!(out)?;
        return Ok(());
    }

    if !fragment.sql.is_empty() {
        writeln!(out, "{}", fragment.sql)?;
        for (i, param) in fragment.params.iter().enumerate() {
            writeln!(out, "  ${} = {}", i + 1, param)?;
        }
    }
    if !order_by.is_empty() {
        writeln!(out, "{}", order_by)?;
    }
    Ok(())
}

/// Split `FIELD=TOKEN` at the first `=`, so `port_dst==100` keeps its `=` sign
fn parse_filter_arg(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((field, token)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), token.to_string()))
        }
        _ => Err(format!("expected FIELD=TOKEN, got {:?}", arg)),
    }
}
