use adscope::application::rank::SortBy;
use adscope::application::search::SearchRequest;
use adscope::cli::commands::{Cli, Commands};
use adscope::domain::error::DomainError;
use adscope::domain::values::platform::Platform;
use adscope::AdScope;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = std::env::var("ADSCOPE_DB").unwrap_or_else(|_| "./adscope.db".into());

    let scope = match AdScope::new(&db_path) {
        Ok(scope) => scope,
        Err(e) => {
            eprintln!("Error initializing adscope: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(scope, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(scope: AdScope, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Search {
            query,
            platform,
            country,
            limit,
            sort,
            user,
        } => {
            let platform: Platform = platform.parse().map_err(|e: String| e)?;
            let sort_by: SortBy = sort.parse().map_err(|e: String| e)?;
            let request = SearchRequest {
                query,
                platform,
                country,
                limit,
                sort_by,
            };
            match scope.search(&user, &request).await {
                Ok(response) => {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                // A denial is an expected outcome, not a failure.
                Err(DomainError::InsufficientCredits { required }) => {
                    println!(
                        "{}",
                        serde_json::json!({
                            "status": "insufficient_credits",
                            "required": required,
                        })
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Credits { user } => {
            let balance = scope.credit_balance(&user)?;
            println!("{}", serde_json::json!({ "user": user, "credits": balance }));
        }
        Commands::Grant { amount, user } => {
            scope.grant_credits(&user, amount)?;
            let balance = scope.credit_balance(&user)?;
            println!("{}", serde_json::json!({ "user": user, "credits": balance }));
        }
        Commands::History { platform, query } => {
            let platform = platform
                .map(|p| p.parse::<Platform>())
                .transpose()
                .map_err(|e: String| e)?;
            let entries = scope.history(platform, query.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
