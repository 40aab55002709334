use crate::{audio, overlay};
use micscope_core::{ScopeConfig, Startup};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::future_to_promise;
use web_sys as web;

/// Show the start prompt and start the session on the first click.
///
/// The audio context is created synchronously inside the click so the
/// browser counts it as user-initiated. The rest of startup runs in a
/// promise; a failure rejects it and is left unhandled, so it surfaces in
/// the console.
pub fn wire_start_prompt(document: &web::Document, config: ScopeConfig) -> anyhow::Result<()> {
    let prompt = overlay::show_start_prompt(document)?;
    let startup = Rc::new(RefCell::new(Startup::new()));

    let closure = Closure::wrap(Box::new(move || {
        if !startup.borrow_mut().begin() {
            return;
        }
        overlay::remove_start_prompt(&prompt);
        let audio_ctx = audio::create_context();
        let startup = startup.clone();
        let config = config.clone();
        _ = future_to_promise(async move {
            let result = match audio_ctx {
                Ok(ctx) => crate::run_session(ctx, &config, &startup).await,
                Err(e) => Err(e.into()),
            };
            result.map(|()| JsValue::UNDEFINED).map_err(|e| {
                startup.borrow_mut().fail(&e);
                js_sys::Error::new(&format!("{:#}", e)).into()
            })
        });
    }) as Box<dyn FnMut()>);

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    window
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("click listener: {:?}", e))?;
    closure.forget();
    Ok(())
}
