use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pathwalk_pose::{
    AnalyticSolver, BoneMap, BoneRotation, Landmark, PoseFrame, PoseRetargeter, Rig,
    SolverOutput, DEFAULT_MIN_VISIBILITY,
};
use pathwalk_terrain::TerrainWorld;

mod config;
mod render;
mod session;

use config::{AppConfig, AppError};
use render::{RenderOptions, Shade, TerrainVisualizer};
use session::{point_on_path, Session};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file with [terrain], [calibration] and [rig] sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the terrain seed
    #[arg(short, long, global = true)]
    seed: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the chunk window around a viewer to a PNG
    Render {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f32,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        z: f32,

        /// Chunks around the viewer's chunk; defaults to the config's radius
        #[arg(short, long)]
        radius: Option<u32>,

        /// Pixels per mesh cell
        #[arg(long, default_value_t = 4)]
        scale: u32,

        /// The output PNG file path
        #[arg(short, long, default_value = "target/terrain.png")]
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = Shade::Color)]
        shade: Shade,

        /// Overlay the road center line
        #[arg(long)]
        path: bool,

        /// Draw trees and rocks
        #[arg(long)]
        props: bool,
    },
    /// Walk a viewer down the road, streaming chunks and driving the rig
    Walk {
        #[arg(long, default_value_t = 200)]
        ticks: u64,

        /// World units covered per tick
        #[arg(long, default_value_t = 1.0)]
        speed: f32,

        /// JSON array of pose frames (or null), replayed in a loop
        #[arg(long)]
        poses: Option<PathBuf>,

        /// Frames hold raw 33-point landmark lists instead of joints
        #[arg(long)]
        landmarks: bool,

        /// Flip every body left for right before solving
        #[arg(long)]
        mirror: bool,
    },
    /// Print the bone rotations for each recorded frame as JSON
    Retarget {
        #[arg(long)]
        poses: PathBuf,

        #[arg(long)]
        landmarks: bool,

        /// Flip every body left for right before solving
        #[arg(long)]
        mirror: bool,

        /// Emit Euler angles instead of quaternions
        #[arg(long)]
        euler: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.terrain.noise.seed = seed;
    }

    match args.command {
        Command::Render { x, z, radius, scale, output, shade, path, props } => {
            if let Some(radius) = radius {
                config.terrain.chunk.radius = radius;
            }
            let mut world = TerrainWorld::new(config.terrain)?;
            log::info!("Generating terrain around ({x}, {z})...");
            world.update(x, z);

            let visualizer = TerrainVisualizer::new()?;
            let img = visualizer.render(&world, &RenderOptions { shade, scale, path, props });
            log::info!("Saving terrain visualization to {}...", output.display());
            img.save(&output)?;
            log::info!("Done!");
        }
        Command::Walk { ticks, speed, poses, landmarks, mirror } => {
            let frames = match poses {
                Some(path) => load_frames(&path, landmarks, mirror)?,
                None => Vec::new(),
            };
            let (rig, retargeter) = pose_stack(&config, SolverOutput::Quaternion)?;
            let world = TerrainWorld::new(config.terrain)?;
            let mut session = Session::new(world, rig, retargeter);

            for tick in 0..ticks {
                let viewer = point_on_path(session.world().field(), tick as f32 * speed);
                let frame = if frames.is_empty() {
                    None
                } else {
                    frames[(tick as usize) % frames.len()].as_ref()
                };
                let report = session.tick(viewer, frame);
                log::debug!(
                    "tick {}: at ({:.1}, {:.2}, {:.1}), {:?}, {} bone writes",
                    report.tick,
                    report.viewer.x,
                    report.ground,
                    report.viewer.z,
                    report.mode,
                    report.bone_writes
                );
            }

            let end = point_on_path(session.world().field(), ticks as f32 * speed);
            log::info!(
                "walked {ticks} ticks to z = {:.1}, {} chunks resident, pose {:?}",
                end.z,
                session.world().len(),
                session.retargeter().mode()
            );
        }
        Command::Retarget { poses, landmarks, mirror, euler } => {
            let frames = load_frames(&poses, landmarks, mirror)?;
            let output = if euler { SolverOutput::Euler } else { SolverOutput::Quaternion };
            let (_, mut retargeter) = pose_stack(&config, output)?;

            let rotations: Vec<Vec<BoneRotation>> = frames
                .iter()
                .map(|frame| retargeter.retarget(frame.as_ref()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rotations)?);
        }
    }

    Ok(())
}

/// A rig named after the configured bone table, bound once up front.
fn pose_stack(
    config: &AppConfig,
    output: SolverOutput,
) -> Result<(Rig, PoseRetargeter<AnalyticSolver>), AppError> {
    let table = config.bone_table()?;
    let rig = Rig::new(table.values().cloned());
    let bones = BoneMap::bind(rig.bone_names(), &table)?;
    let retargeter = PoseRetargeter::new(AnalyticSolver::new(output), bones, config.calibration.clone());
    Ok((rig, retargeter))
}

fn load_frames(path: &Path, landmarks: bool, mirror: bool) -> Result<Vec<Option<PoseFrame>>, AppError> {
    let frames = if landmarks {
        let text = std::fs::read_to_string(path)
            .map_err(|source| AppError::Io { path: path.display().to_string(), source })?;
        let raw: Vec<Option<Vec<Vec<Landmark>>>> = serde_json::from_str(&text)?;
        raw.into_iter()
            .map(|bodies| bodies.map(|b| PoseFrame::from_landmarks(&b, DEFAULT_MIN_VISIBILITY)))
            .collect()
    } else {
        PoseFrame::load_sequence(path)?
    };

    if !mirror {
        return Ok(frames);
    }
    log::info!("mirroring {} frames", frames.len());
    Ok(frames
        .into_iter()
        .map(|frame| frame.map(|f| f.mirrored()))
        .collect())
}
