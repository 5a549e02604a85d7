mod api;
mod fetch;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use best_time::config::AppConfig;
use best_time::{predict, AppContext, PredictRequest};

#[derive(Parser)]
#[command(name = "best-time", about = "Best posting time prediction service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Serve(ServeArgs),
    Predict(PredictArgs),
    FetchModels(FetchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8000)]
    port: u16,
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            config: None,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct PredictArgs {
    #[arg(long)]
    platform: String,
    #[arg(long, default_value_t = 0)]
    followers: u64,
    #[arg(long, default_value_t = 0)]
    account_age_days: u32,
    #[arg(long)]
    verified: bool,
    #[arg(long, default_value = "Text")]
    media_type: String,
    #[arg(long, default_value = "Unknown")]
    location: String,
    #[arg(long, default_value = "")]
    caption: String,
    #[arg(long)]
    cross_platform_spread: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    #[arg(long)]
    base_url: String,
    #[arg(long, default_value = "models")]
    dir: PathBuf,
}

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::serve(args).await,
        Command::Predict(args) => run_predict(args).await,
        Command::FetchModels(args) => fetch::fetch_models(args).await,
    }
}

async fn run_predict(args: PredictArgs) -> Result<(), String> {
    let (config, _) = AppConfig::load(args.config.clone()).map_err(|err| err.to_string())?;
    let context = AppContext::load(&config);

    let request = PredictRequest {
        platform: args.platform,
        followers: args.followers,
        account_age_days: args.account_age_days,
        verified: args.verified,
        media_type: args.media_type,
        location: args.location,
        caption: args.caption,
        cross_platform_spread: args.cross_platform_spread,
    };

    let result = predict(&context, &request)
        .await
        .map_err(|err| err.to_string())?;

    let day_name = DAY_NAMES
        .get(result.best_day as usize)
        .copied()
        .unwrap_or("?");
    println!(
        "Best slot: {} {:02}:00 (day {}, hour {})",
        day_name, result.best_hour, result.best_day, result.best_hour
    );
    println!("Predicted engagement: {:.2}", result.predicted_engagement);

    let insights = &result.nlp_insights;
    println!(
        "Topic: {} | Language: {} | Sentiment: {} (pos {:.2} / neg {:.2} / neu {:.2})",
        insights.topic,
        insights.language,
        insights.sentiment_category,
        insights.sentiment_positive,
        insights.sentiment_negative,
        insights.sentiment_neutral
    );
    println!(
        "Toxicity: {:.1} | Caption: {} chars, {} hashtags",
        insights.toxicity_score, insights.content_length, insights.num_hashtags
    );

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("best_time=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
