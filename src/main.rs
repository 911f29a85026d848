use std::{path::PathBuf, time::Duration};

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotify2ytmusic::{
    cli, config, error,
    transfer::TransferOptions,
    types::{Privacy, SearchAlgorithm},
    utils,
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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the playlists of the Spotify export
    ListPlaylists(ExportOptions),

    /// Check the YTMusic credentials
    Check,

    /// Look up a single song on YTMusic
    Search(SearchOptions),

    /// Create an empty YTMusic playlist
    CreatePlaylist(CreatePlaylistOptions),

    /// Like the Spotify "Liked Songs" on YTMusic
    LoadLiked(TransferArgs),

    /// Like every track of the saved Spotify albums on YTMusic
    LoadLikedAlbums(TransferArgs),

    /// Copy one Spotify playlist to YTMusic
    CopyPlaylist(CopyPlaylistOptions),

    /// Copy every Spotify playlist to a YTMusic playlist of the same name
    CopyAll(TransferArgs),

    /// Copy Spotify playlists chosen by name to YTMusic playlists of the same name
    CopyPlaylists(CopyPlaylistsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct ExportOptions {
    /// Spotify export file [default: playlists.json]
    #[clap(long)]
    playlists_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct TransferArgs {
    #[command(flatten)]
    export: ExportOptions,

    /// Resolve tracks without writing anything to YTMusic
    #[clap(long)]
    dry_run: bool,

    /// Seconds to wait between tracks [default: 0.1]
    #[clap(long, value_parser = utils::parse_seconds)]
    track_sleep: Option<Duration>,

    /// How search results are matched
    #[clap(long, value_enum, default_value_t = SearchAlgorithm::Exact)]
    algo: SearchAlgorithm,

    /// Keep the order of the export instead of copying oldest first
    #[clap(long)]
    no_reverse: bool,

    /// Privacy of playlists that get created
    #[clap(long, value_enum, default_value_t = Privacy::Private)]
    privacy: Privacy,
}

impl TransferArgs {
    fn into_parts(self) -> (Option<PathBuf>, TransferOptions) {
        let options = TransferOptions {
            algorithm: self.algo,
            dry_run: self.dry_run,
            track_sleep: self.track_sleep.unwrap_or_else(config::track_sleep),
            privacy: self.privacy,
            reverse: !self.no_reverse,
            ..TransferOptions::default()
        };
        (self.export.playlists_file, options)
    }
}

#[derive(Args, Debug, Clone)]
pub struct SearchOptions {
    /// Song title
    title: String,

    #[clap(long, default_value = "")]
    artist: String,

    #[clap(long, default_value = "")]
    album: String,

    #[clap(long, value_enum, default_value_t = SearchAlgorithm::Exact)]
    algo: SearchAlgorithm,
}

#[derive(Args, Debug, Clone)]
pub struct CreatePlaylistOptions {
    /// Playlist name
    name: String,

    #[clap(long, value_enum, default_value_t = Privacy::Private)]
    privacy: Privacy,
}

#[derive(Args, Debug, Clone)]
pub struct CopyPlaylistOptions {
    /// Spotify playlist id
    spotify_playlist_id: String,

    /// YTMusic playlist id, "+<name>" to look it up by name, or "" to create one
    ytmusic_playlist: String,

    #[command(flatten)]
    transfer: TransferArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CopyPlaylistsOptions {
    /// Spotify playlist names
    #[clap(required = true, num_args = 1..)]
    names: Vec<String>,

    /// Seconds to wait between two playlists [default: 2]
    #[clap(long, value_parser = utils::parse_seconds)]
    playlist_sleep: Option<Duration>,

    #[command(flatten)]
    transfer: TransferArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::ListPlaylists(opt) => cli::list_playlists(opt.playlists_file).await,
        Command::Check => cli::check().await,
        Command::Search(opt) => cli::search(opt.title, opt.artist, opt.album, opt.algo).await,
        Command::CreatePlaylist(opt) => cli::create_playlist(opt.name, opt.privacy).await,
        Command::LoadLiked(args) => {
            let (file, options) = args.into_parts();
            cli::load_liked(file, options).await
        }
        Command::LoadLikedAlbums(args) => {
            let (file, options) = args.into_parts();
            cli::load_liked_albums(file, options).await
        }
        Command::CopyPlaylist(opt) => {
            let (file, options) = opt.transfer.into_parts();
            cli::copy_playlist(opt.spotify_playlist_id, opt.ytmusic_playlist, file, options).await
        }
        Command::CopyAll(args) => {
            let (file, options) = args.into_parts();
            cli::copy_all(file, options).await
        }
        Command::CopyPlaylists(opt) => {
            let (file, mut options) = opt.transfer.into_parts();
            if let Some(playlist_sleep) = opt.playlist_sleep {
                options.playlist_sleep = playlist_sleep;
            }
            cli::copy_playlists(opt.names, file, options).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
