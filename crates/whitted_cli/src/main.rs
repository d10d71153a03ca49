//! Whitted CLI - render a scene to an image file.
//!
//! Uses the built-in showcase scene unless `--scene` names a JSON scene file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use whitted_core::{SceneDescription, TextureSource};
use whitted_renderer::{render, RenderConfig, RenderContext, Scene, DEFAULT_EDGE};

#[derive(Parser, Debug)]
#[command(name = "whitted")]
#[command(about = "Recursive ray tracer for spheres, pyramids, cylinders and discs", long_about = None)]
struct Cli {
    /// Edge length of the square output image in pixels
    #[arg(short, long, default_value_t = DEFAULT_EDGE, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// JSON scene file (default: built-in showcase scene)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Environment image, overriding the scene's background
    #[arg(long)]
    background: Option<PathBuf>,

    /// Liquid-surface image, overriding the scene's liquid texture
    #[arg(long)]
    liquid: Option<PathBuf>,

    /// Output image (format from extension)
    #[arg(short, long, default_value = "render.jpg")]
    output: PathBuf,

    /// Print the showcase scene as JSON and exit
    #[arg(long)]
    dump_scene: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.dump_scene {
        println!("{}", SceneDescription::showcase().to_json()?);
        return Ok(());
    }

    let (mut description, base_dir) = match &cli.scene {
        Some(path) => {
            let description = SceneDescription::from_path(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            (description, path.parent().map(|p| p.to_path_buf()))
        }
        None => (SceneDescription::showcase(), None),
    };

    if let Some(path) = cli.background {
        description.background = override_texture(path)?;
    }
    if let Some(path) = cli.liquid {
        description.liquid_texture = override_texture(path)?;
    }

    let scene = Scene::from_description(&description, base_dir.as_deref()).context("Invalid scene")?;
    let background = description.background.load(base_dir.as_deref());
    let ctx = RenderContext::new(scene, background, RenderConfig::square(cli.width));

    let image = render(&ctx);
    image
        .save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    log::info!("Saved {}", cli.output.display());
    Ok(())
}

/// Texture named on the command line. Relative paths belong to the working
/// directory, not to the scene file.
fn override_texture(path: PathBuf) -> Result<TextureSource> {
    let path = if path.is_relative() {
        std::env::current_dir()
            .context("Failed to read the working directory")?
            .join(path)
    } else {
        path
    };
    Ok(TextureSource::Image(path))
}
