use clap::{Parser, ValueEnum};
use light_caster::{gnuplot::Figure, json::JsonDes, render, serde_json, Point, Scene};
use log::{info, LevelFilter};
use std::{error::Error, fs::File, path::PathBuf};

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "run_scene_json")]
#[command(about = "Cast the light sources of a JSON scene against its walls and plot the result")]
struct Args {
    /// Path to the scene json file
    scene: PathBuf,

    /// Write the plot to this PNG file instead of opening a gnuplot window
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Plot width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Plot height in pixels
    #[arg(long, default_value = "800")]
    height: u32,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Number of rays that hit a wall, per light source
fn lit_ray_counts(hits: &[Vec<Option<Point>>]) -> Vec<usize> {
    hits.iter()
        .map(|source_hits| source_hits.iter().flatten().count())
        .collect()
}

fn run_scene(scene: &Scene) {
    for (i, (lit, source)) in lit_ray_counts(&scene.cast())
        .into_iter()
        .zip(&scene.sources)
        .enumerate()
    {
        info!(
            "light source #{i} at {:?}: {lit}/{} rays hit a wall",
            source.position().as_slice(),
            source.rays().len(),
        );
    }

    for (ray, hit) in scene.rays.iter().zip(scene.cast_rays()) {
        match hit {
            Some(pt) => info!(
                "ray from {:?} hits {:?}",
                ray.origin.as_slice(),
                pt.as_slice()
            ),
            None => info!("ray from {:?} escapes", ray.origin.as_slice()),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let scene = Scene::from_json(&serde_json::from_reader(File::open(&args.scene)?)?)?;
    info!(
        "loaded {}: {} walls, {} light sources, {} rays",
        args.scene.display(),
        scene.walls.len(),
        scene.sources.len(),
        scene.rays.len(),
    );

    run_scene(&scene);

    let mut fg = Figure::new();
    render::gnuplot::render_gnu_plot(&mut fg, &scene);

    match &args.output {
        Some(path) => {
            fg.save_to_png(path, args.width, args.height)
                .map_err(|e| format!("gnuplot failed: {e:?}"))?;
            info!("plot written to {}", path.display());
        }
        None => {
            fg.show().map_err(|e| format!("gnuplot failed: {e:?}"))?;
        }
    }

    Ok(())
}
