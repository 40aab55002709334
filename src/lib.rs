#![cfg(target_arch = "wasm32")]
use micscope_core::{FrameLoop, ScopeConfig, SeriesSet, Startup};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod viewport;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("micscope starting");

    init().map_err(|e| {
        log::error!("init error: {:?}", e);
        js_sys::Error::new(&format!("{:#}", e)).into()
    })
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let search = window.location().search().unwrap_or_default();
    let config = ScopeConfig::from_query(&search)?;
    log::info!("[config] {:?}", config);
    events::wire_start_prompt(&document, config)
}

/// Everything after the start click: microphone, analyser graph, canvas,
/// GPU pipeline, then the render loop and resize handling.
pub(crate) async fn run_session(
    audio_ctx: web::AudioContext,
    config: &ScopeConfig,
    startup: &RefCell<Startup>,
) -> anyhow::Result<()> {
    let stream = audio::request_microphone().await?;
    startup.borrow_mut().permission_granted()?;
    log::info!("microphone access granted");

    let capture = audio::CaptureSource::connect(audio_ctx, &stream, config)?;

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::create_canvas(&document)?;

    let series = SeriesSet::for_source(&capture);
    let gpu = render::GpuState::new(&canvas, &series).await?;

    let tick: frame::TickSlot = Rc::new(RefCell::new(None));
    let session = Rc::new(RefCell::new(frame::Session {
        frame: frame::FrameContext::new(capture, series, gpu),
        frame_loop: FrameLoop::new(frame::AnimationFrames::new(window, tick.clone())),
        canvas,
    }));
    events::wire_resize(session.clone());
    frame::start_loop(session, tick)?;
    log::info!("render loop running");
    Ok(())
}
