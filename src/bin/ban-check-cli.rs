use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "ban-check-cli")]
#[command(about = "Query a running ban check service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a player's account info and ban status
    Check {
        uid: String,
        /// Region label used when upstream omits one
        #[arg(short, long, default_value = "BD")]
        server: String,
    },
    /// Dump the raw upstream account-info document
    Info { uid: String },
    /// Check service liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match &cli.command {
        Commands::Check { uid, server } => client
            .get(format!("{}/check", base))
            .query(&[("uid", uid.as_str()), ("server", server.as_str())]),
        Commands::Info { uid } => client.get(format!("{}/info/{}", base, uid)),
        Commands::Health => client.get(format!("{}/health", base)),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
    } else {
        eprintln!("Error: service returned status {}", status);
        eprintln!("{}", rendered);
        std::process::exit(1);
    }
    Ok(())
}
