use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use env_logger::Env;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

mod console;
mod controls;
mod error;
mod optics;
mod renderer;
#[cfg(test)]
mod test_helper;
mod ui;

use console::{Args, PartialArgs};
use controls::{Controller, Effect, intent_for_key};
use error::{CausticError, CausticResult};
use optics::{CausticEngine, LensMesh};
use renderer::GpuState;
use ui::{apply_theme, draw_overlay};

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    controller: Controller,
    window_size: (u32, u32),
    show_overlay: bool,
    visible_points: usize,
    failure: Option<CausticError>,
}

impl App {
    fn new(controller: Controller, window_size: (u32, u32)) -> Self {
        Self {
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            controller,
            window_size,
            show_overlay: true,
            visible_points: 0,
            failure: None,
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> CausticResult<()> {
        let gpu = pollster::block_on(GpuState::new(window.clone()))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);

        self.upload_points();
        self.request_redraw();
        Ok(())
    }

    /// Push the current intersections to the GPU, scaled for the current window.
    fn upload_points(&mut self) {
        let Some(gpu) = &mut self.gpu else { return };
        let engine = self.controller.engine();
        self.visible_points = gpu.upload_points(engine.intersections(), engine.domain());
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: CausticError) {
        self.failure = Some(err);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        if key == KeyCode::KeyH {
            self.show_overlay = !self.show_overlay;
            self.request_redraw();
            return;
        }
        let Some(intent) = intent_for_key(key) else {
            return;
        };
        match self.controller.apply(intent) {
            Effect::Redraw => {
                self.upload_points();
                self.request_redraw();
            }
            Effect::Reported => {}
            Effect::Exit => event_loop.exit(),
        }
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return;
        };

        let raw_input = egui_state.take_egui_input(window);

        let engine = self.controller.engine();
        let depth = engine.plane_depth();
        let stats = engine.stats();
        let visible = self.visible_points;
        let show_overlay = self.show_overlay;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if show_overlay {
                draw_overlay(ctx, depth, &stats, visible);
            }
        });

        let Some(gpu) = &mut self.gpu else { return };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return;
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.resize(gpu.size);
                window.request_redraw();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.failure = Some(CausticError::Display("out of GPU memory".into()));
                event_loop.exit();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        gpu.render_points(&view, &mut encoder);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let (width, height) = self.window_size;
        let window_attrs = Window::default_attributes()
            .with_title("Caustics Visualizer")
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(true);

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, CausticError::Display(format!("cannot open window: {e}")));
                return;
            }
        };
        if let Err(e) = self.init_gpu(window) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            let response = egui_state.on_window_event(window, &event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                }
                self.upload_points();
                self.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(key) = event.physical_key {
                        self.handle_key(event_loop, key);
                    }
                }
            }

            WindowEvent::RedrawRequested => self.render(event_loop),

            _ => {}
        }
    }
}

fn run() -> CausticResult<()> {
    let args = Args::try_from(PartialArgs::parse())?;
    let mesh = LensMesh::load(&args.mesh_path)?;
    let engine = CausticEngine::new(mesh, &args.refraction, args.domain, args.plane_depth);
    info!(
        "Receiver plane at z = {}, {} of {} points in the display domain",
        engine.plane_depth(),
        engine.stats().in_domain,
        engine.mesh().sample_count()
    );
    let controller = Controller::new(engine, args.step);

    let event_loop = EventLoop::new()
        .map_err(|e| CausticError::Display(format!("cannot create event loop: {e}")))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(controller, args.window_size);
    event_loop
        .run_app(&mut app)
        .map_err(|e| CausticError::Display(format!("event loop failed: {e}")))?;

    match app.failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
