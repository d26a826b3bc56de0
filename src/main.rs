use std::{ffi::OsString, path::PathBuf};

use clap::{
    ArgAction, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use watchsync::{
    SyncError,
    cli::{Dispatcher, Endpoints, Invocation, Outcome},
    config, error, info,
    management::Settings,
    prompt::TerminalPrompt,
    utils, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// The user_id of the current user (-1 skips the Plex.user_ids check)
    #[clap(long = "userId", allow_negative_numbers = true)]
    user_id: i64,

    /// The type of content: movie, episode or one of the
    /// trakt_/letterboxd_ authenticate and refresh commands
    #[clap(long = "contentType")]
    content_type: OsString,

    /// TVDB show id
    #[clap(long = "tvdbId", visible_alias = "showId")]
    tvdb_id: Option<u64>,

    /// Season number
    #[clap(long)]
    season: Option<u32>,

    /// Episode number
    #[clap(long)]
    episode: Option<u32>,

    /// IMDb movie id (tt...)
    #[clap(long = "imdbId", visible_alias = "movieId")]
    imdb_id: Option<String>,

    /// Settings file to use instead of the default location
    #[clap(long)]
    settings: Option<PathBuf>,

    /// Print diagnostic logs (repeat for more detail)
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "watchsync=debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    if let Err(e) = config::load_env() {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let content_type = match utils::decode_argument(&cli.content_type, &config::tautulli_encoding()) {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };

    let path = cli.settings.unwrap_or_else(config::settings_path);
    let mut settings = match Settings::load(&path) {
        Ok(s) => s,
        Err(e) => error!("{}", e),
    };

    let invocation = Invocation {
        user_id: cli.user_id,
        content_type,
        tvdb_id: cli.tvdb_id,
        season: cli.season,
        episode: cli.episode,
        imdb_id: cli.imdb_id,
    };

    let mut prompt = TerminalPrompt;
    let mut dispatcher = Dispatcher::new(&mut settings, Endpoints::default(), &mut prompt);

    match dispatcher.run(&invocation) {
        Ok(Outcome::Skipped) => info!("We will not sync for this user"),
        Ok(Outcome::Completed(action)) => log::debug!("completed {:?}", action),
        Err(SyncError::UnrecognizedContentType(content_type)) => {
            warning!("Invalid contentType \"{}\", nothing to sync", content_type)
        }
        Err(e) => error!("{}", e),
    }
}
