use crate::audio::CaptureSource;
use crate::render::GpuState;
use instant::Instant;
use micscope_core::{
    FrameHost, FrameLoop, FrameStats, ScopeError, SeriesKind, SeriesSet,
    STATS_REPORT_INTERVAL_SEC,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` bound to the session's tick closure.
pub struct AnimationFrames {
    window: web::Window,
    tick: TickSlot,
}

impl AnimationFrames {
    pub fn new(window: web::Window, tick: TickSlot) -> Self {
        Self { window, tick }
    }
}

impl FrameHost for AnimationFrames {
    type Handle = i32;

    fn request_frame(&self) -> Result<i32, ScopeError> {
        let tick = self.tick.borrow();
        let cb = tick
            .as_ref()
            .ok_or_else(|| ScopeError::Host("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| ScopeError::Host(format!("requestAnimationFrame: {:?}", e)))
    }

    fn cancel_frame(&self, handle: i32) {
        _ = self.window.cancel_animation_frame(handle);
    }
}

/// Everything one frame touches.
pub struct FrameContext {
    pub capture: CaptureSource,
    pub series: SeriesSet,
    pub gpu: GpuState,
    pub stats: FrameStats,
}

impl FrameContext {
    pub fn new(capture: CaptureSource, series: SeriesSet, gpu: GpuState) -> Self {
        Self {
            capture,
            series,
            gpu,
            stats: FrameStats::new(Instant::now(), STATS_REPORT_INTERVAL_SEC),
        }
    }

    pub fn frame(&mut self) -> Result<(), ScopeError> {
        for kind in SeriesKind::ALL {
            let series_frame = self.series.refresh(&self.capture, kind)?;
            self.gpu.upload(&series_frame)?;
        }

        match self.gpu.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface acquire timed out, skipping frame");
            }
            Err(e) => return Err(ScopeError::Gpu(format!("render error: {:?}", e))),
        }

        if let Some(fps) = self.stats.record(Instant::now()) {
            let spectrum = self.series.get(SeriesKind::Spectrum).as_slice();
            log::debug!(
                "[frame] {:.1} fps, last spectrum bin {:.1} dB",
                fps,
                spectrum.last().copied().unwrap_or(f32::NAN)
            );
        }
        Ok(())
    }
}

/// Session-wide state shared by the frame and resize callbacks.
pub struct Session {
    pub frame: FrameContext,
    pub frame_loop: FrameLoop<AnimationFrames>,
    pub canvas: web::HtmlCanvasElement,
}

/// Install the tick closure and schedule the first frame. A failed frame
/// halts the loop for good.
pub fn start_loop(session: Rc<RefCell<Session>>, tick: TickSlot) -> Result<(), ScopeError> {
    let session_tick = session.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut s = session_tick.borrow_mut();
        s.frame_loop.frame_started();
        if let Err(e) = s.frame.frame() {
            log::error!("frame failed, render loop stopped: {}", e);
            s.frame_loop.halt();
            return;
        }
        if let Err(e) = s.frame_loop.schedule() {
            log::error!("could not schedule next frame: {}", e);
            s.frame_loop.halt();
        }
    }) as Box<dyn FnMut()>));
    session.borrow_mut().frame_loop.schedule()
}
