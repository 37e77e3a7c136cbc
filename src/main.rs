use podcastr::config::Settings;
use podcastr::episodes::{source_for, EpisodeCatalog};
use podcastr::init_app_dirs;
use podcastr::media::SimulatedHandle;
use podcastr::player::{Player, PlayerCommand};
use podcastr::ui::terminal::run_transport;
use podcastr::ui::Cli;
use std::error::Error;
use std::path::Path;
use std::time::Duration as StdDuration;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::new();
    if let Err(e) = run(&cli).await {
        cli.display_error(e.as_ref());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let args = &cli.args;

    init_app_dirs()?;

    // Load configuration from file or create default
    let config_path = match &args.config {
        Some(path) => Path::new(path).to_path_buf(),
        None => Settings::default_path(),
    };
    let mut settings = Settings::load(&config_path)?;

    // Command-line arguments (and their env vars) win over the file
    if let Some(source) = &args.source {
        settings.episode_source = source.clone();
    }
    if let Some(limit) = args.limit {
        settings.episode_limit = limit;
    }
    if args.no_autoplay {
        settings.autoplay = false;
    }
    settings.validate()?;

    let log_file = settings.log_file.clone().unwrap_or_else(Settings::default_log_path);
    podcastr::logging::init(Some(&log_file))?;
    info!("podcastr starting with source {}", settings.episode_source);

    println!("Loading episodes from {}...", settings.episode_source);
    let source = source_for(&settings.episode_source)?;
    let catalog = EpisodeCatalog::from_newest_first(source.fetch_episodes(settings.episode_limit).await?);
    if catalog.is_empty() {
        return Err("The episode source returned no episodes".into());
    }
    cli.display_catalog(&catalog);

    let index = match args.episode {
        Some(number) => podcastr::ui::parse_selection(&number.to_string(), catalog.len())?,
        None => cli.select_episode(catalog.len())?,
    };
    let episodes = catalog.all();

    // Wire the player to a simulated output handle
    let (media_tx, media_rx) = mpsc::unbounded_channel();
    let mut handle = SimulatedHandle::from_episodes(media_tx, &episodes);
    handle.start_clock(StdDuration::from_millis(settings.tick_interval_ms));

    let (mut player, commands) = Player::new(handle, media_rx, settings.player_options());
    let updates = player.subscribe_state_updates();

    let first = if args.single {
        PlayerCommand::PlaySingle(episodes[index].clone())
    } else {
        PlayerCommand::PlayFromList { episodes, index }
    };
    commands.send(first).await?;

    let (_, transport_result) = tokio::join!(
        player.run(),
        run_transport(commands, updates, settings.seek_step_seconds)
    );
    transport_result?;

    info!("podcastr exiting");
    Ok(())
}
