use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xtsttopng::models::{AppConfig, PaletteScope};
use xtsttopng::rendering::RasterFormat;
use xtsttopng::services::Batch;

#[derive(Parser)]
#[command(name = "xtsttopng")]
#[command(about = "Render run-length encoded pixel traces to images, one color per pixel value")]
struct Cli {
    /// Trace files to decode
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output image format
    #[arg(short, long, value_enum)]
    format: Option<RasterFormat>,

    /// Directory for output files (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Give every frame its own palette instead of one shared palette
    #[arg(long)]
    per_frame: bool,

    /// Seed for palette map level generation
    #[arg(long)]
    seed: Option<u64>,

    /// YAML config file (also read from XTSTTOPNG_CONFIG)
    #[arg(short, long, env = "XTSTTOPNG_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command-line options take precedence over the config file
    fn apply(self, mut config: AppConfig) -> (AppConfig, Vec<PathBuf>) {
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = Some(dir);
        }
        if self.per_frame {
            config.palette_scope = PaletteScope::Frame;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        (config, self.inputs)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xtsttopng=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let (config, inputs) = cli.apply(config);

    let summary = Batch::new(config).run(&inputs)?;

    println!("{} colors", summary.colors);
    Ok(())
}
