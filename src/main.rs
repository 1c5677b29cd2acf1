use anyhow::Result;
use clap::Parser;
use ghpeek::commands::{Config, check, preview};
use ghpeek::session::SystemClock;

/// ghpeek - repository previews for links
///
/// Fetches the metadata a hover preview would show and prints the card.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// Otherwise the token from the settings file is used, if any.
///
/// Examples:
///   ghpeek preview owner/repo
///   ghpeek preview https://github.com/owner/repo --html
///   ghpeek check https://github.com/owner/repo/issues
#[derive(Parser, Debug)]
#[command(author, version = env!("GHPEEK_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Host whose repository links get previews (defaults to github.com)
    #[arg(long = "host", value_name = "HOST", global = true)]
    pub host: Option<String>,

    /// Access token sent as a bearer credential
    #[arg(
        long = "token",
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        value_name = "TOKEN",
        global = true
    )]
    pub token: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch a repository and print its preview card
    Preview(PreviewArgs),

    /// Report whether a link would get a preview
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct PreviewArgs {
    /// Repository URL or "owner/repo"
    #[arg(value_name = "URL|OWNER/REPO")]
    pub target: String,

    /// Print the popup markup instead of a text card
    #[arg(long)]
    pub html: bool,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// The link to check
    #[arg(value_name = "URL")]
    pub url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = ghpeek::runtime::RealRuntime;
    let config = Config::new(runtime, cli.api_url, cli.host, cli.token)?;

    match cli.command {
        Commands::Preview(args) => preview(&config, &args.target, args.html, &SystemClock).await?,
        Commands::Check(args) => {
            if !check(&config.matcher, &args.url) {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
