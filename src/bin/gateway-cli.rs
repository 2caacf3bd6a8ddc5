use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Operator CLI for the gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway health
    Health,
    /// Dump the Prometheus exposition
    Metrics,
    /// Ask which service owns a path
    Route {
        /// Request path, e.g. /users/123
        path: String,

        #[arg(short, long, default_value = "GET")]
        method: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_json(res).await?;
        }
        Commands::Metrics => {
            let res = client.get(format!("{}/metrics", base)).send().await?;
            let status = res.status();
            let text = res.text().await?;
            if !status.is_success() {
                eprintln!("Error: gateway returned status {}", status);
            }
            println!("{}", text);
        }
        Commands::Route { path, method } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
            let path = if path.starts_with('/') { path } else { format!("/{}", path) };
            let res = client
                .request(method, format!("{}{}", base, path))
                .send()
                .await?;
            print_json(res).await?;
        }
    }

    Ok(())
}

/// Pretty-print a JSON body. Non-2xx answers (e.g. 404 routing failures) are
/// still printed since their body carries the explanation.
async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Gateway returned status {}", status);
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
