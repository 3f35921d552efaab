use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporlbot::{
    category::AlbumGroupExtended,
    cli::{self, Bot},
    config::{self, Settings},
    error, logging,
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
    /// Log debug output
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Crawl periodically and serve the HTTP endpoints
    Serve,

    /// Run a single crawl
    Crawl,

    /// Remove obsolete [NEW] indicators from playlists
    ClearNotifiers,

    /// Show or change the playlist of each album group
    Playlists(PlaylistsOptions),

    /// Store the access and refresh token used for the Spotify API
    Token(TokenOptions),

    /// Print the log file
    Log(LogOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    #[command(subcommand)]
    pub command: Option<PlaylistsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistsSubcommand {
    /// Set the playlist of a group; omit the id to disable the group
    Set(PlaylistSetOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistSetOpts {
    /// Album group, e.g. album, single, ep, appears-on
    #[clap(value_parser = parse_group)]
    pub group: AlbumGroupExtended,

    pub playlist_id: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TokenOptions {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Parser, Debug, Clone)]
pub struct LogOptions {
    /// Number of lines, negative for the whole file
    #[clap(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn parse_group(value: &str) -> Result<AlbumGroupExtended, String> {
    value.parse()
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };
    if let Err(e) = logging::init(&settings.log_file, cli.verbose) {
        error!("Cannot set up logging. Err: {}", e);
    }

    let bot = Bot::from_settings(settings);

    let result = match cli.command {
        Command::Serve => cli::serve(bot).await,
        Command::Crawl => cli::crawl(&bot).await,
        Command::ClearNotifiers => cli::clear_notifiers(&bot).await,
        Command::Playlists(opt) => match opt.command {
            Some(PlaylistsSubcommand::Set(s)) => {
                cli::set_playlist(&bot, s.group, s.playlist_id).await
            }
            None => cli::list_playlists(&bot).await,
        },
        Command::Token(opt) => cli::save_token(&bot, &opt.access_token, &opt.refresh_token).await,
        Command::Log(opt) => cli::show_log(&bot, opt.limit).await,
        Command::Completions(_) => Ok(()),
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}
