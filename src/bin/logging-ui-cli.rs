use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use url::Url;

#[derive(Parser)]
#[command(name = "logging-ui-cli")]
#[command(about = "Inspect and change logger levels of a running service", long_about = None)]
struct Cli {
    /// Base URL of the logger API, including its base path
    #[arg(short, long, default_value = "http://localhost:8080/")]
    url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every known logger
    List,
    /// Show one logger
    Get { name: String },
    /// Set the configured level of a logger
    Set { name: String, level: String },
    /// Remove the configured level so the logger inherits again
    Reset { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::List => {
            let res = client.get(cli.url).send().await?;
            print_response(res).await?;
        }
        Commands::Get { name } => {
            let res = client.get(logger_url(&cli.url, &name)?).send().await?;
            print_response(res).await?;
        }
        Commands::Set { name, level } => {
            let res = client
                .post(logger_url(&cli.url, &name)?)
                .json(&json!({ "configuredLevel": level }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Reset { name } => {
            let res = client
                .post(logger_url(&cli.url, &name)?)
                .json(&json!({ "configuredLevel": null }))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

fn logger_url(base: &Url, name: &str) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| format!("{base} cannot be used as a base URL"))?
        .pop_if_empty()
        .push(name);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: logger API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    if status == reqwest::StatusCode::NO_CONTENT {
        println!("OK");
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
