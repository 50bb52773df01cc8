use clap::Parser;
use std::sync::Arc;
use venues_client::utils::logger;
use venues_client::{
    ApiSettings, CliConfig, Command, Coordinate, FoursquareInvoker, VenuesClient, VenuesConfig,
};

async fn run(
    cli: CliConfig,
    config: VenuesConfig,
    settings: ApiSettings,
) -> venues_client::Result<serde_json::Value> {
    let invoker = FoursquareInvoker::new(settings)?;
    let client = VenuesClient::new(Arc::new(invoker));

    let params = cli.param_bag()?;
    let token = cli.token.as_deref().or(config.access_token());

    match cli.command {
        Command::Categories => client.get_categories(params, token).await,
        Command::Explore(at) => {
            client
                .explore(Some(Coordinate::from(at.lat)), Some(Coordinate::from(at.lng)), params, token)
                .await
        }
        Command::Search(at) => {
            client
                .search(Some(Coordinate::from(at.lat)), Some(Coordinate::from(at.lng)), params, token)
                .await
        }
        Command::Trending(at) => {
            client
                .get_trending(Some(Coordinate::from(at.lat)), Some(Coordinate::from(at.lng)), params, token)
                .await
        }
        Command::Venue { venue_id } => client.get_venue(Some(venue_id.as_str()), token).await,
        Command::Aspect { venue_id, aspect } => {
            client
                .get_venue_aspect(Some(venue_id.as_str()), Some(aspect.as_str()), params, token)
                .await
        }
        Command::HereNow { venue_id } => client.get_here_now(Some(venue_id.as_str()), params, token).await,
        Command::Tips { venue_id } => client.get_tips(Some(venue_id.as_str()), params, token).await,
        Command::Photos { venue_id, group } => {
            client
                .get_photos(Some(venue_id.as_str()), group.as_deref(), params, token)
                .await
        }
        Command::Links { venue_id } => client.get_links(Some(venue_id.as_str()), params, token).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match VenuesConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Could not load {}: {}", cli.config, e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting venues CLI");
    if cli.verbose {
        tracing::debug!("CLI command: {:?}", cli.command);
    }

    let settings = match config.api_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    match run(cli, config, settings).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Request failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            let exit_code = if e.is_validation() { 2 } else { 1 };
            std::process::exit(exit_code);
        }
    }
}
