//! # Pixelmap CLI
//!
//! Command-line interface for the LED wall pixel map renderer.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP service
//! pixelmap serve --listen 0.0.0.0:8080
//!
//! # Refuse oversized walls instead of shrinking them
//! pixelmap serve --max-pixels 50000000 --oversize reject
//!
//! # Use a TrueType font for the name overlay
//! pixelmap serve --font /usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf
//!
//! # Render a request body offline
//! pixelmap render request.json --output wall.png
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pixelmap::{
    PixelMapError, PixelMapRequest,
    render::{
        self,
        limits::{CanvasLimits, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_PIXELS, OversizePolicy},
        text::TextFace,
    },
    server::{self, DEFAULT_LISTEN_ADDR, ServerConfig},
};

/// Pixelmap - LED wall pixel map renderer
#[derive(Parser, Debug)]
#[command(name = "pixelmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
        listen: String,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a request JSON file to a PNG
    Render {
        /// Request body: {"surface": {...}, "config": {...}}
        input: PathBuf,

        /// Output PNG path
        #[arg(long, short, default_value = "pixelmap.png")]
        output: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },
}

/// Options shared by both commands.
#[derive(Args, Debug)]
struct RenderArgs {
    /// Largest canvas, in pixels
    #[arg(long, default_value_t = DEFAULT_MAX_PIXELS)]
    max_pixels: u64,

    /// Largest canvas side, in pixels
    #[arg(long, default_value_t = DEFAULT_MAX_DIMENSION)]
    max_dimension: u32,

    /// What to do with oversized canvases: downscale or reject
    #[arg(long, default_value = "downscale")]
    oversize: OversizePolicy,

    /// TrueType/OpenType font for the name overlay
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,
}

impl RenderArgs {
    fn limits(&self) -> CanvasLimits {
        CanvasLimits {
            max_pixels: self.max_pixels,
            max_dimension: self.max_dimension,
            policy: self.oversize,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), PixelMapError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen, render: args } => {
            let config = ServerConfig {
                listen_addr: listen,
                limits: args.limits(),
                font_path: args.font,
            };
            server::serve(config).await?;
        }
        Commands::Render {
            input,
            output,
            render: args,
        } => {
            let body = std::fs::read(&input)?;
            let request = PixelMapRequest::from_json(&body).map_err(|e| {
                PixelMapError::InvalidSurface(format!("{}: {}", input.display(), e))
            })?;
            let face = match &args.font {
                Some(path) => TextFace::from_file(path)?,
                None => TextFace::Bitmap,
            };

            let map = render::render_pixel_map(&request.surface, &request.config, &args.limits(), &face)?;
            let png = map.to_png()?;
            std::fs::write(&output, &png)?;

            info!(
                width = map.width(),
                height = map.height(),
                scale = map.plan.scale_factor,
                panels = map.grid.panels,
                bytes = png.len(),
                "Saved to {}",
                output.display()
            );
        }
    }

    Ok(())
}
