use clap::{Parser, Subcommand};

use keyword_bot::application::errors::BotError;
use keyword_bot::application::messaging::SharedRegistry;
use keyword_bot::application::services::KeywordBot;
use keyword_bot::domain::traits::ChatClient;
use keyword_bot::infrastructure::adapters::{ConsoleAdapter, TwitchAdapter};
use keyword_bot::infrastructure::config::Config;
use keyword_bot::infrastructure::display;

#[derive(Parser)]
#[command(name = "keyword-bot")]
#[command(about = "Twitch chat bot that reacts to custom keywords", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, env = "BOT_CONFIG", default_value = "config.yaml")]
    config: String,

    /// Channel to join (overrides config and TWITCH_CHANNEL)
    #[arg(long)]
    channel: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Twitch chat and dispatch keywords
    Run,
    /// Read chat lines from stdin instead of Twitch
    Console,
    /// Show version
    Version,
    /// Generate a sample config
    InitConfig,
}

fn main() {
    // Credentials usually live in a local .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_twitch(load_config(&cli.config, cli.channel)),
        Commands::Console => run_console(load_config(&cli.config, cli.channel)),
        Commands::Version => {
            println!("keyword-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str, channel: Option<String>) -> Config {
    let mut config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path)
            .map(Config::with_env)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            })
    } else {
        Config::load_env()
    };

    if channel.is_some() {
        config.twitch.channel = channel;
    }
    config
}

fn runtime() -> Result<tokio::runtime::Runtime, BotError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))
}

fn run_twitch(config: Config) -> Result<(), BotError> {
    // Fail before any connection attempt
    let credentials = config.credentials()?;
    tracing::info!("Starting {} for #{}", config.bot.name, credentials.channel);

    runtime()?.block_on(async {
        let client = TwitchAdapter::new(credentials);
        let mut bot = build_bot(client, &config)?;
        bot.run().await
    })
}

fn run_console(config: Config) -> Result<(), BotError> {
    let channel = config.twitch.channel.clone().unwrap_or_else(|| "console".to_string());
    tracing::info!("Starting {} in console mode", config.bot.name);

    runtime()?.block_on(async {
        let client = ConsoleAdapter::stdin(channel);
        let mut bot = build_bot(client, &config)?;
        bot.register_listing("!bindings")?;
        bot.run().await
    })
}

fn build_bot<C: ChatClient>(client: C, config: &Config) -> Result<KeywordBot<C>, BotError> {
    let bot = KeywordBot::new(client, SharedRegistry::new())
        .with_renderer(display::renderer(config.bot.highlight));

    let count = bot.register_replies(&config.keywords)?;
    tracing::info!("Registered {} configured keywords", count);
    Ok(bot)
}

fn init_config() -> Result<(), BotError> {
    let yaml = Config::sample().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and put TWITCH_OAUTH_PASS in .env.");
    Ok(())
}
