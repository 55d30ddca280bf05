use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use futures::executor::block_on;
use media_stage_core::{
    viewport::supports_hover, AppConfig, InertialScroll, MetadataUpdate, NowPlayingPanel, Page,
    PageEvent, PageManifest, PresentationSink, SimulatedOutput,
};
use tracing_subscriber::EnvFilter;

fn main() -> media_stage_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            manifest,
            config,
            script,
            reject,
            block_autoplay,
        } => run_page(
            &manifest,
            config.as_deref(),
            script.as_deref(),
            reject,
            block_autoplay,
        ),
        Commands::Layout { width, config } => show_layout(width, config.as_deref()),
    }
}

fn run_page(
    manifest: &Path,
    config: Option<&Path>,
    script: Option<&Path>,
    reject: Vec<String>,
    block_autoplay: bool,
) -> media_stage_core::Result<()> {
    tracing::info!(?manifest, ?script, "mounting page");

    let config = load_config(config)?;
    let manifest = PageManifest::load(manifest)?;

    let mut output = SimulatedOutput::new();
    for uri in reject {
        output.reject(uri);
    }
    output.block_autoplay(block_autoplay);

    let scroll = InertialScroll::new(config.scroll.clone());
    let mut page = Page::mount(manifest, config, output, LoggedDisplay::default(), scroll);

    let events: Vec<PageEvent> = match script {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Vec::new(),
    };

    for event in events {
        match page.dispatch(event) {
            Ok(Some(pending)) => {
                let completion = block_on(pending.wait());
                // Failures are already reported by the controller.
                let _ = page.settle(completion);
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "event rejected"),
        }
        for tween in page.drain_tweens() {
            tracing::debug!(?tween, "cursor tween");
        }

        let state = page.snapshot().playback;
        tracing::info!(active = ?state.active_item, playing = state.is_playing, "event handled");
    }

    println!("{}", serde_json::to_string_pretty(&page.snapshot())?);
    Ok(())
}

fn show_layout(width: u32, config: Option<&Path>) -> media_stage_core::Result<()> {
    let config = load_config(config)?;
    let report = serde_json::json!({
        "width": width,
        "carousel": config.carousel.layout_for(width),
        "hover_preview": supports_hover(width, &config.viewport),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> media_stage_core::Result<AppConfig> {
    match path {
        Some(path) => {
            tracing::debug!(?path, "loading config");
            AppConfig::load(path)
        }
        None => Ok(AppConfig::default()),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Now-playing panel that logs every change.
#[derive(Debug, Default)]
struct LoggedDisplay {
    panel: NowPlayingPanel,
}

impl PresentationSink for LoggedDisplay {
    fn show(&mut self, update: &MetadataUpdate) {
        self.panel.show(update);
        tracing::info!(
            image = self.panel.image.as_deref().unwrap_or(""),
            title = self.panel.title.as_deref().unwrap_or(""),
            artist = self.panel.artist.as_deref().unwrap_or(""),
            "now playing display updated"
        );
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive media page driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mount a page and replay a script of input events against it.
    Run {
        /// Page manifest describing tracks, videos and optional surfaces.
        manifest: PathBuf,
        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// JSON array of page events to replay.
        #[arg(short, long)]
        script: Option<PathBuf>,
        /// Audio source that should fail to play. May be repeated.
        #[arg(long)]
        reject: Vec<String>,
        /// Refuse every playback start, as a host autoplay policy would.
        #[arg(long)]
        block_autoplay: bool,
    },
    /// Print the carousel layout and hover support for a viewport width.
    Layout {
        /// Viewport width in logical pixels.
        width: u32,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
