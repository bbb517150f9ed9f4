use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{render, write_ppm, Camera, CameraSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

mod config;
mod scenes;

use scenes::SceneKind;

/// Render a built-in scene with the Glint path tracer.
///
/// Writes a plain-text PPM to stdout unless `--output` is given.
#[derive(Parser, Debug)]
#[command(name = "glint", version, about)]
struct Args {
    /// Scene to render
    #[arg(short, long, value_enum, default_value_t = SceneKind::Quickstart)]
    scene: SceneKind,

    /// JSON file with camera settings to apply on top of the scene's camera
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(short, long)]
    width: Option<u32>,

    /// Aspect ratio, e.g. `16/9` or `1.5`
    #[arg(long, value_parser = config::parse_aspect)]
    aspect: Option<f64>,

    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    max_depth: Option<u32>,

    /// Seed for the random generator; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Output file (`.ppm`, `.png`); stdout PPM when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    /// Resolve the final camera: scene defaults, config file, then flags.
    fn camera_settings(&self, scene_camera: CameraSettings) -> Result<CameraSettings> {
        let mut settings = match &self.config {
            Some(path) => config::load_settings(path, &scene_camera)?,
            None => scene_camera,
        };

        if let Some(width) = self.width {
            settings.image_width = width;
        }
        if let Some(aspect) = self.aspect {
            settings.aspect_ratio = aspect;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = max_depth;
        }

        settings.validate().context("Invalid camera settings")?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Scene {:?}, seed {}", args.scene, seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let (world, scene_camera) = scenes::build(args.scene, &mut rng);
    log::info!("Scene has {} objects", world.len());

    let camera = Camera::new(args.camera_settings(scene_camera)?);
    let image = render(&camera, &world, &mut rng);

    match &args.output {
        Some(path) => image
            .save(path)
            .with_context(|| format!("Failed to save {}", path.display()))?,
        None => {
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_ppm(&image, &mut writer).context("Failed to write image to stdout")?;
            writer.flush()?;
        }
    }

    log::info!("Done.");
    Ok(())
}
