use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use egui::Context as EguiContext;
use pathmotion_input::{Key, action_for, controls_help};
use pathmotion_render::Camera;
use pathmotion_render_wgpu::{GpuContext, WgpuRenderer};
use pathmotion_scene::{Flow, Frame, FrameClock, Scene, ScenePreset, SceneState};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SceneArg {
    /// Single lit cube; arrow keys rotate the cube
    Cube,
    /// Textured cube, pyramid and sphere; arrow keys rotate the scene
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

#[derive(Parser)]
#[command(name = "pathmotion-desktop", about = "Animated primitives on Bezier paths")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Which demo to run
    #[arg(long, value_enum, default_value = "trio")]
    scene: SceneArg,

    /// Window width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Target frame rate
    #[arg(long, default_value = "60")]
    fps: u32,
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::Space => Key::Space,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyZ => Key::Z,
        KeyCode::KeyX => Key::X,
        KeyCode::Escape => Key::Escape,
        KeyCode::F1 => Key::F1,
        _ => return None,
    })
}

/// Application state.
struct AppState {
    scene: Scene,
    state: SceneState,
    camera: Camera,
    clock: FrameClock,
    frame: Option<Frame>,
}

impl AppState {
    fn new(scene: Scene, width: u32, height: u32, fps: u32) -> Self {
        let mut camera = Camera::new(scene.camera_distance, 1.0);
        camera.set_viewport(width, height);
        Self {
            scene,
            state: SceneState::new(),
            camera,
            clock: FrameClock::new(fps, Instant::now()),
            frame: None,
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> Flow {
        match map_key(code) {
            Some(key) => self.state.apply(&action_for(key)),
            None => Flow::Continue,
        }
    }

    /// Step the scene when the clock says a frame is due.
    fn advance(&mut self, now: Instant) {
        if self.frame.is_some() && !self.clock.is_due(now) {
            return;
        }
        self.clock.mark_frame(now);
        let frame = self.scene.step(&mut self.state);
        self.camera.follow(&frame);
        self.frame = Some(frame);
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.state.show_overlay {
            return;
        }

        egui::Window::new("pathmotion")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Scene: {}", self.scene.preset.name()));
                if let Some(frame) = &self.frame {
                    ui.label(format!("Frame: {}  t: {:.3}", frame.index, frame.t));
                }
                ui.label(format!(
                    "Rotation: ({:.0}, {:.0})  Zoom: {}",
                    self.state.rot_x, self.state.rot_y, self.state.zoom
                ));
                ui.label(format!(
                    "Auto-rotate: {}  Paths: {}",
                    if self.state.auto_rotate { "on" } else { "off" },
                    if self.state.show_path { "on" } else { "off" }
                ));
                ui.separator();
                for line in controls_help() {
                    ui.small(*line);
                }
            });
    }
}

struct GpuApp {
    state: AppState,
    width: u32,
    height: u32,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    init_error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState, width: u32, height: u32) -> Self {
        Self {
            state,
            width,
            height,
            window: None,
            gpu: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            init_error: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(format!("pathmotion - {}", self.state.scene.preset.name()))
            .with_inner_size(PhysicalSize::new(self.width, self.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)?;
        self.state.camera.set_viewport(size.width, size.height);

        let shapes: Vec<_> = self.state.scene.objects.iter().map(|o| o.shape).collect();
        let (width, height) = gpu.size();
        let renderer =
            WgpuRenderer::new(&gpu.device, &gpu.queue, gpu.format(), width, height, &shapes);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format(), None, 1, false);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn redraw(&mut self) {
        self.state.advance(Instant::now());

        let Self {
            state,
            window,
            gpu,
            renderer,
            egui_ctx,
            egui_winit,
            egui_renderer,
            ..
        } = self;
        let (Some(window), Some(gpu), Some(renderer), Some(egui_winit), Some(egui_renderer)) =
            (window, gpu, renderer, egui_winit, egui_renderer)
        else {
            return;
        };
        let Some(frame) = &state.frame else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer.render(&gpu.device, &gpu.queue, &view, &state.camera, frame);

        let raw_input = egui_winit.take_egui_input(window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_graphics(event_loop) {
            tracing::error!("graphics initialization failed: {e:#}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    let (width, height) = gpu.size();
                    self.state.camera.set_viewport(width, height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(&gpu.device, width, height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if self.state.handle_key(key) == Flow::Exit {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if self.state.clock.is_due(now) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.state.clock.deadline().max(now)));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let preset = ScenePreset::from(cli.scene);
    tracing::info!(scene = preset.name(), fps = cli.fps, "pathmotion-desktop starting");

    println!("\nControls:");
    for line in controls_help() {
        println!("{line}");
    }
    println!();

    let scene = Scene::new(preset)?;
    let state = AppState::new(scene, cli.width, cli.height, cli.fps);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.init_error.take() {
        return Err(e);
    }
    tracing::info!(frames = app.state.state.frame, "pathmotion-desktop exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_state(preset: ScenePreset) -> AppState {
        AppState::new(Scene::new(preset).unwrap(), 800, 600, 60)
    }

    #[test]
    fn winit_keys_map_to_demo_keys() {
        assert_eq!(map_key(KeyCode::ArrowLeft), Some(Key::Left));
        assert_eq!(map_key(KeyCode::KeyP), Some(Key::P));
        assert_eq!(map_key(KeyCode::Escape), Some(Key::Escape));
        assert_eq!(map_key(KeyCode::KeyW), None);
    }

    #[test]
    fn escape_exits_and_unbound_keys_do_nothing() {
        let mut app = app_state(ScenePreset::Cube);
        assert_eq!(app.handle_key(KeyCode::KeyQ), Flow::Continue);
        assert_eq!(app.handle_key(KeyCode::Escape), Flow::Exit);
    }

    #[test]
    fn advance_is_paced_by_the_clock() {
        let mut app = app_state(ScenePreset::Trio);
        let now = Instant::now();
        app.advance(now);
        app.advance(now);
        assert_eq!(app.state.frame, 1);
        app.advance(now + app.clock.interval());
        assert_eq!(app.state.frame, 2);
        assert_eq!(app.camera.distance, 20.0);
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["pathmotion-desktop"]);
        assert!(matches!(cli.scene, SceneArg::Trio));
        assert_eq!((cli.width, cli.height, cli.fps), (800, 600, 60));
        let cli = Cli::parse_from(["pathmotion-desktop", "--scene", "cube", "-v"]);
        assert!(matches!(cli.scene, SceneArg::Cube));
        assert!(cli.verbose);
    }
}
