use std::sync::Arc;

use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::{
    frame_budget_ms, COLOR_KEY, FPS_LOG_INTERVAL, SCREEN_HEIGHT, SCREEN_WIDTH, SPRITE_SHEET_PATH,
    WINDOW_TITLE,
};
use crate::error::{DemoError, Result};
use crate::render::GpuState;
use crate::stage::Stage;
use crate::surface::Surface;
use crate::timer::{frame_delay, Timer};

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

/// Rolling frame statistics, logged every `FPS_LOG_INTERVAL` seconds.
struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    work_ms_sum: u64,
    work_ms_min: u32,
    work_ms_max: u32,
    overruns: u32,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            work_ms_sum: 0,
            work_ms_min: u32::MAX,
            work_ms_max: 0,
            overruns: 0,
            frames_since_log: 0,
        }
    }

    /// Record how long one frame's work took before its sleep.
    fn record_frame(&mut self, work_ms: u32, budget_ms: u32) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.work_ms_sum += u64::from(work_ms);
        self.work_ms_min = self.work_ms_min.min(work_ms);
        self.work_ms_max = self.work_ms_max.max(work_ms);
        if work_ms >= budget_ms {
            self.overruns += 1;
        }

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = self.work_ms_sum as f64 / self.frames_since_log as f64;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.1} | work avg: {:.1}ms | min: {}ms | max: {}ms | overruns: {} | total frames: {}",
                fps,
                avg_ms,
                self.work_ms_min,
                self.work_ms_max,
                self.overruns,
                self.frame_count,
            );
            self.last_log_time = Instant::now();
            self.work_ms_sum = 0;
            self.work_ms_min = u32::MAX;
            self.work_ms_max = 0;
            self.overruns = 0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state. One loop iteration per frame:
/// `new_events` starts the frame timer, `window_event` drains input,
/// `about_to_wait` updates, draws, presents, and schedules the next frame.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,

    stage: Stage,

    // Frame pacing
    frame_timer: Timer,
    frame_due: bool,
    quit: bool,

    frame_stats: FrameStats,

    /// First fatal error; ends the loop and becomes the exit status.
    fatal: Option<DemoError>,
}

impl App {
    fn new(stage: Stage) -> Self {
        Self {
            window: None,
            gpu: None,
            stage,
            frame_timer: Timer::default(),
            frame_due: false,
            quit: false,
            frame_stats: FrameStats::new(),
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: DemoError) {
        self.fatal.get_or_insert(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        let gpu = GpuState::new(window.clone(), SCREEN_WIDTH, SCREEN_HEIGHT)?;
        log::info!("wgpu + frame pipeline initialized");

        self.gpu = Some(gpu);
        self.window = Some(window);
        Ok(())
    }

    /// Update, draw, present, then arm the wait for the rest of the budget.
    fn run_frame(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let Some(gpu) = self.gpu.as_mut() else {
            // No surface yet; the next resume starts a fresh frame.
            event_loop.set_control_flow(ControlFlow::Wait);
            return Ok(());
        };

        self.stage.update();
        self.stage.render();
        gpu.present(self.stage.screen())?;

        let budget_ms = frame_budget_ms();
        let work_ms = self.frame_timer.ticks();
        self.frame_stats.record_frame(work_ms, budget_ms);

        let control = match frame_delay(work_ms, budget_ms) {
            Some(delay) => ControlFlow::WaitUntil(Instant::now() + delay),
            None => ControlFlow::Poll,
        };
        event_loop.set_control_flow(control);
        Ok(())
    }
}

/// Whether a loop wake-up starts a new frame. Input arriving before the
/// pending deadline wakes the loop early; that is not a new frame.
fn frame_is_due(cause: StartCause, now: Instant) -> bool {
    match cause {
        StartCause::WaitCancelled {
            requested_resume: Some(deadline),
            ..
        } => now >= deadline,
        _ => true,
    }
}

impl ApplicationHandler for App {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if !frame_is_due(cause, Instant::now()) {
            return;
        }
        self.frame_timer.start();
        self.frame_due = true;
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.quit = true;
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.fatal.is_some() {
            return;
        }

        if self.frame_due {
            self.frame_due = false;
            if let Err(e) = self.run_frame(event_loop) {
                self.fail(event_loop, e);
                return;
            }
        }

        if self.quit {
            event_loop.exit();
        }
    }
}

/// Entry point: load the sprite sheet, open the window, and run until quit.
pub fn run() -> Result<()> {
    let event_loop = EventLoop::new()?;

    let sprite_sheet = Surface::load(SPRITE_SHEET_PATH)?.with_color_key(COLOR_KEY);
    log::info!(
        "Loaded sprite sheet {}: {}x{}",
        SPRITE_SHEET_PATH,
        sprite_sheet.width(),
        sprite_sheet.height()
    );

    let mut app = App::new(Stage::new(sprite_sheet));
    event_loop.run_app(&mut app)?;

    log::info!(
        "Shutting down after {} frames",
        app.frame_stats.frame_count
    );
    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
