mod logger;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use photobook_layout::store::ConfigStore;
use photobook_layout::{
    Alignment, CaptionPosition, LayoutConfig, Orientation, PageTarget, PaperSize,
    calculate_statistics, compute_layout, export_pdf, load_assets,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pbl", about = "Photobook layout CLI", version)]
struct Cli {
    /// Increase log detail (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the layout and print statistics
    Layout {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Write the computed pages as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Write a PDF proof of the layout
    Export {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show or persist layout settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings as JSON
    Show {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Apply setting flags and save them (to the album if given, else globally)
    Save {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Asset list (.json array or .csv with a header row)
    #[arg(short, long)]
    assets: PathBuf,

    #[command(flatten)]
    source: SourceArgs,
}

/// Where base settings come from
#[derive(Args)]
struct SourceArgs {
    /// Settings JSON file
    #[arg(long, conflicts_with = "store")]
    config: Option<PathBuf>,

    /// Settings store directory
    #[arg(long)]
    store: Option<PathBuf>,

    /// Album id within the store
    #[arg(long, requires = "store")]
    album: Option<String>,
}

/// Per-run overrides applied on top of the loaded settings
#[derive(Args)]
struct SettingsArgs {
    /// Named paper size
    #[arg(long, value_enum, conflicts_with_all = ["width", "height"])]
    paper: Option<PaperArg>,

    /// Paper orientation (with --paper)
    #[arg(long, value_enum, default_value = "landscape")]
    orientation: OrientationArg,

    /// Custom page width in pixels at 300 DPI
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Custom page height in pixels at 300 DPI
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Page margin in pixels
    #[arg(long)]
    margin: Option<f32>,

    /// Target row height in pixels
    #[arg(long)]
    row_height: Option<f32>,

    /// Spacing between photos in pixels
    #[arg(long)]
    spacing: Option<f32>,

    /// Combine page pairs into spreads
    #[arg(long)]
    spreads: bool,

    /// Default caption placement
    #[arg(long, value_enum)]
    captions: Option<CaptionArg>,

    /// Page alignment as PAGE=left|center|right (repeatable)
    #[arg(long = "align", value_parser = parse_alignment)]
    alignments: Vec<(u32, Alignment)>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum CaptionArg {
    Overlay,
    Left,
    Right,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
        }
    }
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<CaptionArg> for CaptionPosition {
    fn from(arg: CaptionArg) -> Self {
        match arg {
            CaptionArg::Overlay => Self::Overlay,
            CaptionArg::Left => Self::Left,
            CaptionArg::Right => Self::Right,
        }
    }
}

fn parse_alignment(value: &str) -> Result<(u32, Alignment), String> {
    let (page, mode) = value
        .split_once('=')
        .ok_or_else(|| format!("expected PAGE=MODE, got '{}'", value))?;
    let page: u32 = page
        .trim()
        .parse()
        .map_err(|_| format!("invalid page number '{}'", page))?;
    if page == 0 {
        return Err("page numbers start at 1".to_string());
    }
    let mode = match mode.trim().to_ascii_lowercase().as_str() {
        "left" => Alignment::Left,
        "center" => Alignment::Center,
        "right" => Alignment::Right,
        other => return Err(format!("unknown alignment '{}'", other)),
    };
    Ok((page, mode))
}

impl SettingsArgs {
    fn apply(&self, mut config: LayoutConfig) -> LayoutConfig {
        if let Some(paper) = self.paper {
            config.page = PageTarget::Paper {
                size: paper.into(),
                orientation: self.orientation.into(),
            };
        }
        if let (Some(width_px), Some(height_px)) = (self.width, self.height) {
            config.page = PageTarget::Custom {
                width_px,
                height_px,
            };
        }
        if let Some(margin) = self.margin {
            config.margin_px = margin;
        }
        if let Some(row_height) = self.row_height {
            config.row_height_px = row_height;
        }
        if let Some(spacing) = self.spacing {
            config.spacing_px = spacing;
        }
        if self.spreads {
            config.combine_spreads = true;
        }
        if let Some(captions) = self.captions {
            config.caption_position = captions.into();
        }
        config.page_alignments.extend(self.alignments.iter().copied());
        config.clamped()
    }
}

impl SourceArgs {
    async fn load(&self) -> Result<LayoutConfig> {
        if let Some(path) = &self.config {
            return LayoutConfig::load(path)
                .await
                .with_context(|| format!("loading settings from {}", path.display()));
        }
        self.load_store().await
    }

    /// Settings to start a save from; a settings file may not exist yet
    async fn load_for_save(&self) -> Result<LayoutConfig> {
        if let Some(path) = &self.config {
            return LayoutConfig::load_or_default(path)
                .await
                .with_context(|| format!("loading settings from {}", path.display()));
        }
        self.load_store().await
    }

    async fn load_store(&self) -> Result<LayoutConfig> {
        let Some(root) = &self.store else {
            return Ok(LayoutConfig::default());
        };
        let store = ConfigStore::new(root);
        let config = match &self.album {
            Some(album) => store.load_album(album).await?,
            None => store.load_global().await?,
        };
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::from_verbosity(cli.verbose)
        .init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?;

    match cli.command {
        Commands::Layout {
            input,
            settings,
            json,
        } => {
            let assets = load_assets(&input.assets).await?;
            let config = settings.apply(input.source.load().await?);
            let pages = compute_layout(&assets, &config);

            let stats = calculate_statistics(&assets, &pages, &config);
            println!("Layout Statistics:");
            println!("  Assets: {}", stats.assets);
            println!("  Logical pages: {}", stats.logical_pages);
            println!("  Output pages: {}", stats.output_pages);
            println!("  Rows: {}", stats.rows);
            println!("  Average row height: {:.1}px", stats.average_row_height_px);
            println!("  Customized assets: {}", stats.customized_assets);
            println!("  Side captions: {}", stats.side_captions);

            if let Some(path) = json {
                let body = serde_json::to_string_pretty(&pages)?;
                tokio::fs::write(&path, body).await?;
                println!("Pages → {}", path.display());
            }
        }

        Commands::Export {
            input,
            settings,
            output,
        } => {
            let assets = load_assets(&input.assets).await?;
            let config = settings.apply(input.source.load().await?);
            let pages = compute_layout(&assets, &config);
            if pages.is_empty() {
                bail!("{} contains no assets", input.assets.display());
            }

            let title = input
                .assets
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Photobook".to_string());
            export_pdf(&pages, &assets, &title, &output).await?;
            println!("Exported {} pages → {}", pages.len(), output.display());
        }

        Commands::Config { action } => match action {
            ConfigAction::Show { source } => {
                let config = source.load().await?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::Save { source, settings } => {
                let config = settings.apply(source.load_for_save().await?);
                match (&source.config, &source.store, &source.album) {
                    (Some(path), _, _) => {
                        config.save(path).await?;
                        println!("Saved settings → {}", path.display());
                    }
                    (None, Some(root), Some(album)) => {
                        ConfigStore::new(root).save_album(album, &config).await?;
                        println!("Saved album '{}' settings", album);
                    }
                    (None, Some(root), None) => {
                        ConfigStore::new(root).save_global(&config).await?;
                        println!("Saved global settings → {}", root.display());
                    }
                    (None, None, _) => bail!("config save needs --config or --store"),
                }
            }
        },
    }

    Ok(())
}
