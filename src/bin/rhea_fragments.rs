use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use rhea_fragments::config::ConfigLoader;
use rhea_fragments::domain::{Pattern, PatternResult, Term};
use rhea_fragments::error::FragmentError;
use rhea_fragments::forward::ForwardResolver;
use rhea_fragments::reverse::ReverseResolver;
use rhea_fragments::rhea::RheaHttpClient;
use rhea_fragments::xrefdb::XrefDbHttpClient;

#[derive(Parser)]
#[command(name = "rhea-fragments")]
#[command(about = "Answer triple patterns over Rhea reactions via enrichment identifiers")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Resolve a single triple pattern")]
    Query(QueryArgs),
}

#[derive(Args)]
struct QueryArgs {
    #[arg(long, short = 's')]
    subject: Option<String>,

    #[arg(long, short = 'p')]
    predicate: Option<String>,

    #[arg(long, short = 'o')]
    object: Option<String>,

    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(report) = run().await {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<FragmentError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &FragmentError) -> u8 {
    match error {
        FragmentError::RheaHttp(_)
        | FragmentError::RheaStatus { .. }
        | FragmentError::XrefHttp(_)
        | FragmentError::XrefStatus { .. } => 3,
        FragmentError::ConfigRead(_) | FragmentError::ConfigParse(_) => 2,
        _ => 1,
    }
}

async fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Query(args) => run_query(args).await,
    }
}

async fn run_query(args: QueryArgs) -> miette::Result<()> {
    let config = ConfigLoader::resolve(args.config.as_deref()).into_diagnostic()?;
    let pattern = Pattern::new(
        term(args.subject),
        term(args.predicate),
        term(args.object),
    );

    let rhea = RheaHttpClient::new(&config.rhea_cml_prefix, &config.rhea_ws_url).into_diagnostic()?;
    let xrefs = XrefDbHttpClient::new(&config.xrefdb_url).into_diagnostic()?;

    let forward = ForwardResolver::new(config.clone(), rhea.clone(), xrefs.clone());
    let reverse = ReverseResolver::new(config, rhea, xrefs);

    // Stand-in for the host dispatch: first resolver that does not decline
    // owns the answer.
    let mut result = forward.resolve(&pattern).await.into_diagnostic()?;
    if result == PatternResult::NotApplicable {
        result = reverse.resolve(&pattern).await.into_diagnostic()?;
    }

    let rendered = serde_json::to_string_pretty(&result).into_diagnostic()?;
    println!("{rendered}");
    Ok(())
}

fn term(value: Option<String>) -> Term {
    match value {
        Some(value) => Term::Bound(value),
        None => Term::Unbound,
    }
}
