use crate::dom;
use crate::frame::Session;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keep the canvas, surface and viewport at window size. The pending frame
/// is cancelled before resizing and rescheduled after, so a burst of resize
/// events never leaves more than one frame queued.
pub fn wire_resize(session: Rc<RefCell<Session>>) {
    let closure = Closure::wrap(Box::new(move || {
        let mut s = session.borrow_mut();
        let Session {
            frame,
            frame_loop,
            canvas,
        } = &mut *s;
        let size = dom::window_inner_size(frame.gpu.max_surface_dim());
        let restarted = frame_loop.restart_with(|| {
            dom::set_canvas_size(canvas, size);
            frame.gpu.resize(size.0, size.1);
        });
        if let Err(e) = restarted {
            log::error!("resize could not reschedule rendering: {}", e);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
