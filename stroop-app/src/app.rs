use crate::cli::Args;
use crate::display::DisplayPlan;
use anyhow::{Context, Result};
use pixels::{Pixels, SurfaceTexture};
use rand::rngs::ThreadRng;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use stroop_experiment::{Effect, Session, available_resolutions};
use stroop_locale::Localization;
use stroop_render::{SkiaRenderer, compose, icon::icon_rgba};
use stroop_timing::{FramePacer, HighPrecisionTimer, Timer};
use tracing::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    monitor::MonitorHandle,
    window::{Icon, Window, WindowId},
};

const TARGET_FPS: u32 = 60;
const ICON_SIZE: u32 = 64;
/// Frame statistics are logged once a minute at the target rate
const STATS_EVERY: u64 = 3600;

pub struct App {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    renderer: Option<SkiaRenderer>,
    session: Session<HighPrecisionTimer, ThreadRng>,
    localization: Localization,
    pacer: FramePacer<HighPrecisionTimer>,
    render_timer: HighPrecisionTimer,
    config_path: PathBuf,
    resolutions: Vec<(u32, u32)>,
    icon: Option<Icon>,
    surface: (u32, u32),

    should_exit: bool,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        let settings = args.settings();
        let localization =
            Localization::load_or_builtin(args.translations.as_deref(), settings.language);
        let timer = HighPrecisionTimer::new();
        let pacer = FramePacer::new(timer.clone(), TARGET_FPS);
        let render_timer = timer.clone();
        let surface = (settings.screen_width, settings.screen_height);
        let session = Session::new(settings, timer, rand::rng());

        Ok(Self {
            window: None,
            pixels: None,
            renderer: None,
            session,
            localization,
            pacer,
            render_timer,
            config_path: args.config,
            resolutions: available_resolutions(None),
            icon: Self::build_icon(),
            surface,
            should_exit: false,
        })
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        info!(
            platform = std::env::consts::OS,
            arch = std::env::consts::ARCH,
            "stroop test starting"
        );

        event_loop.run_app(&mut self).map_err(Into::into)
    }

    fn monitor(event_loop: &ActiveEventLoop) -> Option<MonitorHandle> {
        event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
    }

    fn monitor_size(monitor: Option<&MonitorHandle>) -> Option<(u32, u32)> {
        monitor.map(|m| {
            let size = m.size();
            (size.width, size.height)
        })
    }

    /// Display plan for the current settings, switching to the safe
    /// windowed setup when the requested one cannot work
    fn plan(&mut self, monitor: Option<&MonitorHandle>) -> Result<DisplayPlan> {
        let monitor_size = Self::monitor_size(monitor);
        match DisplayPlan::for_settings(&self.session.settings, monitor_size) {
            Ok(plan) => Ok(plan),
            Err(err) => {
                warn!("{err:#}");
                let followups = self.session.display_failed();
                self.run_effects(followups, None);
                DisplayPlan::for_settings(&self.session.settings, monitor_size)
                    .context("safe display mode is not available either")
            }
        }
    }

    fn create_window_and_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let monitor = Self::monitor(event_loop);
        self.resolutions = available_resolutions(Self::monitor_size(monitor.as_ref()));
        let plan = self.plan(monitor.as_ref())?;

        let base = Window::default_attributes()
            .with_title("Stroop")
            .with_window_icon(self.icon.clone());
        let window = Arc::new(event_loop.create_window(plan.attributes(base, monitor.as_ref()))?);
        let size = window.inner_size();

        info!(
            width = size.width,
            height = size.height,
            scale = window.scale_factor(),
            refresh_hz = ?monitor
                .as_ref()
                .and_then(|m| m.refresh_rate_millihertz())
                .map(|r| r as f64 / 1000.0),
            ?plan,
            "display configured"
        );

        let surface_texture = SurfaceTexture::new(size.width, size.height, window.clone());
        self.pixels = Some(Pixels::new(size.width, size.height, surface_texture)?);
        self.renderer = Some(SkiaRenderer::new(size.width, size.height)?);
        self.surface = (size.width, size.height);

        window.request_redraw();
        self.window = Some(window);

        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let (w, h) = self.surface;
        if w == 0 || h == 0 {
            return Ok(());
        }
        let (Some(pixels), Some(renderer)) = (self.pixels.as_mut(), self.renderer.as_mut()) else {
            return Ok(());
        };

        let scene = compose(&self.session, &self.localization, self.surface, &self.resolutions);
        let stats = renderer.render_frame(&scene, pixels.frame_mut(), &mut self.render_timer)?;

        let now = self.render_timer.now();
        pixels.render()?;
        let present = self.render_timer.elapsed(now);

        trace!(
            "present {:.3}ms, clear {:.3}ms, paint {:.3}ms, copy {:.3}ms, dirty {}",
            present.as_secs_f64() * 1e3,
            stats.clear.as_secs_f64() * 1e3,
            stats.paint.as_secs_f64() * 1e3,
            stats.copy.as_secs_f64() * 1e3,
            stats.dirty_count,
        );
        Ok(())
    }

    fn run_effects(&mut self, effects: Vec<Effect>, event_loop: Option<&ActiveEventLoop>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            debug!(?effect, "applying effect");
            match effect {
                Effect::ApplyDisplay => {
                    if let Err(err) = self.apply_display(event_loop) {
                        warn!("display change failed: {err:#}");
                        queue.extend(self.session.display_failed());
                        if let Err(err) = self.apply_display(event_loop) {
                            error!("safe display mode failed: {err:#}");
                        }
                    }
                }
                Effect::ApplyLanguage(language) => {
                    self.localization.set_language(language);
                }
                Effect::SaveSettings => {
                    if let Err(err) = self.session.settings.save(&self.config_path) {
                        warn!("{err}");
                    }
                }
                Effect::ExportResults => {
                    let path = self.session.settings.results_path.clone();
                    match self.session.export().write(&path) {
                        Ok(()) => info!(path = %path.display(), "results exported"),
                        Err(err) => warn!("{err}"),
                    }
                }
                Effect::Exit => {
                    if let Some(event_loop) = event_loop {
                        self.cleanup_and_exit(event_loop);
                    } else {
                        self.should_exit = true;
                    }
                }
            }
        }
    }

    fn apply_display(&mut self, event_loop: Option<&ActiveEventLoop>) -> Result<()> {
        let Some(window) = self.window.clone() else {
            return Ok(());
        };
        let monitor = event_loop
            .and_then(Self::monitor)
            .or_else(|| window.current_monitor());
        let plan = DisplayPlan::for_settings(
            &self.session.settings,
            Self::monitor_size(monitor.as_ref()),
        )?;
        plan.apply(&window, monitor.as_ref());
        info!(?plan, "display change requested");
        Ok(())
    }

    fn handle_input(&mut self, key: PhysicalKey, event_loop: &ActiveEventLoop) {
        if key == PhysicalKey::Code(KeyCode::Escape) {
            let effects = self.session.escape();
            self.run_effects(effects, Some(event_loop));
        }
    }

    fn handle_click(&mut self, event_loop: &ActiveEventLoop) {
        let Some((x, y)) = self.session.hover() else {
            return;
        };
        let effects = self.session.click(x, y, self.surface, &self.resolutions);
        self.run_effects(effects, Some(event_loop));
    }

    fn handle_resize(&mut self, new_size: PhysicalSize<u32>) {
        self.surface = (new_size.width, new_size.height);
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        if let Some(pixels) = &mut self.pixels {
            if let Err(e) = pixels.resize_surface(new_size.width, new_size.height) {
                error!("failed to resize surface: {e}");
            }
            if let Err(e) = pixels.resize_buffer(new_size.width, new_size.height) {
                error!("failed to resize buffer: {e}");
            }
        }
        if let Some(renderer) = &mut self.renderer {
            if let Err(e) = renderer.resize(new_size.width, new_size.height) {
                error!("failed to resize renderer: {e:#}");
            }
        }
        info!(width = new_size.width, height = new_size.height, "display resized");
    }

    fn log_frame_stats(&self) {
        let frame = self.pacer.timer().frame_stats();
        let render = self.render_timer.frame_stats();
        if frame.samples == 0 {
            return;
        }
        info!(
            frames = self.pacer.frame_count(),
            fps = format_args!("{:.1}", frame.effective_fps),
            jitter_ms = format_args!("{:.3}", frame.jitter_ns / 1e6),
            render_avg_ms = format_args!("{:.3}", render.average_frame_time_ns / 1e6),
            render_max_ms = format_args!("{:.3}", render.max_frame_time_ns / 1e6),
            "frame timing"
        );
    }

    fn cleanup_and_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.log_frame_stats();
        let log = self.session.controller().log();
        info!(
            correct = log.correct,
            incorrect = log.incorrect,
            "session closed"
        );
        self.should_exit = true;
        event_loop.exit();
    }

    fn build_icon() -> Option<Icon> {
        let rgba = icon_rgba(ICON_SIZE)?;
        Icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE)
            .map_err(|e| warn!("window icon rejected: {e}"))
            .ok()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window_and_surface(event_loop) {
                error!("failed to create window and surface: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.cleanup_and_exit(event_loop),
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    error!("render failed: {e:#}");
                    self.cleanup_and_exit(event_loop);
                    return;
                }
                let effects = self.session.tick();
                self.run_effects(effects, Some(event_loop));
                self.pacer.finish_frame();
                if self.pacer.frame_count() % STATS_EVERY == 0 {
                    self.log_frame_stats();
                }
                if let Some(win) = &self.window {
                    win.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.session
                    .set_hover(Some((position.x as f32, position.y as f32)));
            }
            WindowEvent::CursorLeft { .. } => self.session.set_hover(None),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.handle_click(event_loop),
            WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() => {
                self.handle_input(event.physical_key, event_loop);
            }
            WindowEvent::Resized(sz) => self.handle_resize(sz),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.handle_resize(size);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
        }
    }
}
