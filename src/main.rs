use clap::{Parser as ClapParser, Subcommand};
use expressive_query::cli::{self, CheckOptions, CheckResult, CliError, QueryOptions};
use expressive_query::{QuerierConfig, QueryParameters, DEFAULT_MAX_NESTING, DEFAULT_TAKE};
use std::collections::HashMap;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(ClapParser)]
#[command(name = "exq")]
#[command(about = "exq - Filter, order and page JSON records with where/orderBy/skip/take text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a query over a JSON array of records
    Query {
        /// Schema file describing the record fields
        #[arg(short, long)]
        schema: PathBuf,

        /// JSON array of records (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Filter expression
        #[arg(short, long = "where")]
        filter: Option<String>,

        /// Ordering, e.g. "Age desc thenBy Name"
        #[arg(short, long)]
        order_by: Option<String>,

        /// Records to skip after ordering
        #[arg(long)]
        skip: Option<String>,

        /// Maximum records to return
        #[arg(long)]
        take: Option<String>,

        /// Page size when --take is absent
        #[arg(long, default_value_t = DEFAULT_TAKE)]
        default_take: usize,

        /// Bound on parenthesis and relation nesting
        #[arg(long, default_value_t = DEFAULT_MAX_NESTING)]
        max_nesting: usize,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Compile a filter and/or ordering against a schema without running it
    Check {
        /// Schema file describing the record fields
        #[arg(short, long)]
        schema: PathBuf,

        /// Filter expression
        #[arg(short, long = "where")]
        filter: Option<String>,

        /// Ordering expression
        #[arg(short, long)]
        order_by: Option<String>,

        /// Bound on parenthesis and relation nesting
        #[arg(long, default_value_t = DEFAULT_MAX_NESTING)]
        max_nesting: usize,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'exq docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expressive_query=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let result = match cli.command {
        Commands::Query {
            schema,
            input,
            filter,
            order_by,
            skip,
            take,
            default_take,
            max_nesting,
            pretty,
        } => {
            let raw = RawParameters {
                filter,
                order_by,
                skip,
                take,
            };
            let config = QuerierConfig {
                default_take,
                max_nesting,
            };
            run_query(schema, input, raw, config, pretty)
        }
        Commands::Check {
            schema,
            filter,
            order_by,
            max_nesting,
        } => {
            let config = QuerierConfig {
                max_nesting,
                ..QuerierConfig::default()
            };
            run_check(schema, filter, order_by, config)
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Command-line values as a client would send them, before `skip`/`take`
/// are validated.
struct RawParameters {
    filter: Option<String>,
    order_by: Option<String>,
    skip: Option<String>,
    take: Option<String>,
}

impl RawParameters {
    fn parse(self) -> Result<QueryParameters, CliError> {
        let mut map = HashMap::new();
        let entries = [
            (QueryParameters::WHERE, self.filter),
            (QueryParameters::ORDER_BY, self.order_by),
            (QueryParameters::SKIP, self.skip),
            (QueryParameters::TAKE, self.take),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        }
        Ok(QueryParameters::from_map(&map)?)
    }
}

fn run_query(
    schema: PathBuf,
    input: Option<String>,
    raw: RawParameters,
    config: QuerierConfig,
    pretty: bool,
) -> Result<(), CliError> {
    let schema = std::fs::read_to_string(schema)?;
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = QueryOptions {
        schema,
        input,
        params: raw.parse()?,
        config,
    };

    let output = cli::execute_query(&options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }?;
    println!("{}", json);
    Ok(())
}

fn run_check(
    schema: PathBuf,
    filter: Option<String>,
    order_by: Option<String>,
    config: QuerierConfig,
) -> Result<(), CliError> {
    let options = CheckOptions {
        schema: std::fs::read_to_string(schema)?,
        filter,
        order_by,
        config,
    };

    match cli::execute_check(&options)? {
        CheckResult::Valid { fields } => {
            println!("Query is valid");
            for (name, field_type) in fields {
                println!("  {:<20} {}", name, field_type);
            }
        }
    }
    Ok(())
}
