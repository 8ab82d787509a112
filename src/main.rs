use std::path::PathBuf;

use anyhow::{ bail, Context, Result };
use clap::Parser;

use ray_caster::canvas::{ Image, PpmFormat };
use ray_caster::config::{ RenderOptions, ShadowPolicy, AmbientPolicy };
use ray_caster::parallel::render;
use ray_caster::scene::Scene;

/// Renders a JSON scene description to a PPM image.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Width in pixels of the generated image
    width: usize,

    /// Height in pixels of the generated image
    height: usize,

    /// Scene description (JSON)
    input: PathBuf,

    /// Where to write the image
    output: PathBuf,

    /// Number of worker threads (defaults to one per core)
    #[clap(short, long)]
    threads: Option<usize>,

    /// Output format: p3 (ASCII) or p6 (binary)
    #[clap(short, long, default_value = "p6")]
    format: PpmFormat,

    /// Shadow test: nearer-than-light or any-hit
    #[clap(long, default_value = "nearer-than-light")]
    shadows: ShadowPolicy,

    /// Ambient accumulation: per-light or once
    #[clap(long, default_value = "per-light")]
    ambient: AmbientPolicy,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let args = Args::parse();

    if args.width == 0 || args.height == 0 {
        bail!("invalid dimensions for output image ({} {})",
            args.width, args.height);
    }

    let scene = Scene::load(&args.input)
        .with_context(|| format!("failed to load scene {}",
            args.input.display()))?;

    let options = RenderOptions {
        threads: args.threads,
        shadow_policy: args.shadows,
        ambient_policy: args.ambient,
        ..Default::default()
    };

    let mut image = Image::new(args.width, args.height);
    render(&scene, &mut image, &options)?;

    image.save(&args.output, args.format)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!("Saved render to {}.", args.output.display());

    Ok(())
}
