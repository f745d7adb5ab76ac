use clap::{Parser, Subcommand};
use site_assets::config::{self, AssetsConfig, CarouselConfig, IconsConfig};
use site_assets::{carousel, icons, output};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

#[derive(Parser)]
#[command(name = "site-assets")]
#[command(about = "Generate web icons and carousel previews from source artwork")]
#[command(long_about = "\
Generate web icons and carousel previews from source artwork

  icons      favicon.ico → icon-16x16.png ... android-chrome-512x512.png,
             apple-touch-icon.png (transparent, centered, never upscaled)
  carousel   photo directory → {slug}-{width}x{height}.webp
             (3:2 canvas, squircle corners, stale previews purged first)

Settings come from site-assets.toml when present; flags override it.
Run 'site-assets gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (default: site-assets.toml, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the PNG icon set from a multi-resolution icon
    Icons(IconArgs),
    /// Prepare squircle WebP carousel previews from a photo directory
    Carousel(CarouselArgs),
    /// Print a stock site-assets.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct IconArgs {
    /// Path to the source icon (default: assets/Icons/favicon.ico)
    input: Option<PathBuf>,

    /// Output directory for PNG icons (default: client/public/icons)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Source image for apple-touch-icon.png (default: assets/Icons/eatwithmaddie.png)
    #[arg(long)]
    apple_source: Option<PathBuf>,
}

impl IconArgs {
    fn apply(self, mut config: IconsConfig) -> IconsConfig {
        if let Some(input) = self.input {
            config.source = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.apple_source.is_some() {
            config.apple_source = self.apple_source;
        }
        config
    }
}

#[derive(clap::Args)]
struct CarouselArgs {
    /// Source image directory (default: assets/Meal Carousel)
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Destination directory (default: client/public/images/carousel)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Comma-separated output widths in pixels for 3:2 images (default: 360,600)
    #[arg(long)]
    widths: Option<String>,

    /// WebP quality 1-100 (default: 88)
    #[arg(long, allow_negative_numbers = true)]
    quality: Option<i64>,
}

impl CarouselArgs {
    fn apply(self, mut config: CarouselConfig) -> Result<CarouselConfig, carousel::CarouselError> {
        if let Some(raw) = self.widths {
            config.widths = carousel::parse_widths(&raw)?;
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if let Some(input_dir) = self.input_dir {
            config.input_dir = input_dir;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Icons(args) => {
            let settings = args.apply(load_config(cli.config)?.icons);
            let (tx, printer) = spawn_printer(output::print_icon_event);
            let result = icons::generate(
                &settings.source,
                &settings.output,
                settings.apple_source.as_deref(),
                Some(tx),
            );
            join_printer(printer)?;
            result?;
        }
        Command::Carousel(args) => {
            let settings = args.apply(load_config(cli.config)?.carousel)?;
            let (tx, printer) = spawn_printer(output::print_carousel_event);
            let result = carousel::prepare(&settings, Some(tx));
            join_printer(printer)?;
            result?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the explicit `--config` file, or the default one when it exists.
fn load_config(path: Option<PathBuf>) -> Result<AssetsConfig, config::ConfigError> {
    match path {
        Some(path) => config::load_required_config(&path),
        None => config::load_config(Path::new(config::DEFAULT_CONFIG_FILE)),
    }
}

/// Print pipeline events on a separate thread as they arrive.
///
/// The pipeline owns the sender; the printer exits once it is dropped.
fn spawn_printer<E: Send + 'static>(print: fn(&E)) -> (Sender<E>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            print(&event);
        }
    });
    (tx, printer)
}

fn join_printer(printer: JoinHandle<()>) -> Result<(), Box<dyn std::error::Error>> {
    printer.join().map_err(|_| "output printer thread panicked".into())
}
