use clap::{Parser, Subcommand, ValueEnum};
use glam::DVec3;
use pathmotion_curve::{BezierCurve, PATH_SEGMENTS};
use pathmotion_input::{Key, action_for};
use pathmotion_render::{Camera, DebugTextRenderer, Renderer};
use pathmotion_scene::{Flow, Frame, Scene, ScenePreset, SceneState};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pathmotion-cli", about = "Headless tool for the pathmotion demos")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SceneArg {
    Cube,
    Trio,
}

impl From<SceneArg> for ScenePreset {
    fn from(arg: SceneArg) -> Self {
        match arg {
            SceneArg::Cube => ScenePreset::Cube,
            SceneArg::Trio => ScenePreset::Trio,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KeyArg {
    Left,
    Right,
    Up,
    Down,
    Space,
    P,
    Z,
    X,
    Escape,
}

impl From<KeyArg> for Key {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::Left => Key::Left,
            KeyArg::Right => Key::Right,
            KeyArg::Up => Key::Up,
            KeyArg::Down => Key::Down,
            KeyArg::Space => Key::Space,
            KeyArg::P => Key::P,
            KeyArg::Z => Key::Z,
            KeyArg::X => Key::X,
            KeyArg::Escape => Key::Escape,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Sample every path of a scene
    Sample {
        #[arg(short, long, value_enum, default_value = "trio")]
        scene: SceneArg,
        /// Number of segments; the path has segments + 1 points
        #[arg(long, default_value_t = PATH_SEGMENTS)]
        segments: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Step a scene and print the last frame
    Simulate {
        #[arg(short, long, value_enum, default_value = "trio")]
        scene: SceneArg,
        /// Number of frames to step
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Keys pressed before the first frame, comma separated
        #[arg(long, value_enum, value_delimiter = ',')]
        press: Vec<KeyArg>,
    },
}

#[derive(Serialize)]
struct SampledPath<'a> {
    object: &'a str,
    control_points: &'a BezierCurve,
    samples: Vec<DVec3>,
}

fn sample_scene(scene: &Scene, segments: usize) -> Vec<SampledPath<'_>> {
    scene
        .objects
        .iter()
        .map(|o| SampledPath {
            object: o.name,
            control_points: &o.path,
            samples: o.path.sample(segments),
        })
        .collect()
}

/// Apply `keys`, then step `frames` times. Returns `None` if a key quit first.
fn simulate(scene: &Scene, keys: &[Key], frames: u64) -> Option<Frame> {
    tracing::debug!(keys = keys.len(), frames, "simulating");
    let mut state = SceneState::new();
    for key in keys {
        if state.apply(&action_for(*key)) == Flow::Exit {
            return None;
        }
    }
    let mut last = None;
    for _ in 0..frames {
        last = Some(scene.step(&mut state));
    }
    last
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("pathmotion-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", pathmotion_render::crate_info());
            for preset in [ScenePreset::Cube, ScenePreset::Trio] {
                let scene = Scene::new(preset)?;
                let names: Vec<_> = scene.objects.iter().map(|o| o.name).collect();
                println!(
                    "scene {}: camera={} objects=[{}]",
                    preset.name(),
                    scene.camera_distance,
                    names.join(", ")
                );
            }
        }
        Commands::Sample {
            scene,
            segments,
            json,
        } => {
            let scene = Scene::new(scene.into())?;
            let paths = sample_scene(&scene, segments);
            if json {
                println!("{}", serde_json::to_string_pretty(&paths)?);
            } else {
                for path in &paths {
                    println!("{} ({} points)", path.object, path.samples.len());
                    for (i, p) in path.samples.iter().enumerate() {
                        let t = i as f64 / segments.max(1) as f64;
                        println!("  t={t:.2} ({:.4}, {:.4}, {:.4})", p.x, p.y, p.z);
                    }
                }
            }
        }
        Commands::Simulate {
            scene,
            frames,
            press,
        } => {
            let scene = Scene::new(scene.into())?;
            let keys: Vec<Key> = press.into_iter().map(Key::from).collect();
            match simulate(&scene, &keys, frames) {
                Some(frame) => {
                    let mut camera = Camera::new(scene.camera_distance, 800.0 / 600.0);
                    camera.follow(&frame);
                    print!("{}", DebugTextRenderer::new().render(&frame, &camera));
                }
                None => println!("no frame rendered"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_one_path_per_object() {
        let scene = Scene::new(ScenePreset::Trio).unwrap();
        let paths = sample_scene(&scene, PATH_SEGMENTS);
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.samples.len() == 101));
    }

    #[test]
    fn sample_json_round_trips_control_points() {
        let scene = Scene::new(ScenePreset::Cube).unwrap();
        let json = serde_json::to_value(sample_scene(&scene, 4)).unwrap();
        assert_eq!(json[0]["object"], "cube");
        assert_eq!(json[0]["control_points"][0], serde_json::json!([-4.0, -2.0, 0.0]));
        assert_eq!(json[0]["samples"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn simulate_applies_keys_then_steps() {
        let scene = Scene::new(ScenePreset::Cube).unwrap();
        let frame = simulate(&scene, &[Key::P, Key::Z, Key::Z], 10).unwrap();
        assert_eq!(frame.index, 10);
        assert!(frame.paths.is_empty());
        assert_eq!(frame.zoom, 2);
    }

    #[test]
    fn simulate_stops_on_escape() {
        let scene = Scene::new(ScenePreset::Cube).unwrap();
        assert!(simulate(&scene, &[Key::Escape], 10).is_none());
        assert!(simulate(&scene, &[], 0).is_none());
    }

    #[test]
    fn cli_parses_press_list() {
        let cli = Cli::parse_from(["pathmotion-cli", "simulate", "--press", "space,right,p"]);
        match cli.command {
            Commands::Simulate { press, frames, .. } => {
                assert_eq!(press.len(), 3);
                assert_eq!(frames, 60);
            }
            _ => panic!("expected simulate"),
        }
    }
}
