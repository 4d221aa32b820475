use crate::dom;
use crate::input::{self, DragMode, DragTracker};
use scatter_core::{PointerSample, ViewerState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<ViewerState>>,
    pub drag: Rc<RefCell<DragTracker>>,
}

/// Pointer position in CSS pixels relative to the canvas.
fn local_pos(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> [f32; 2] {
    let rect = canvas.get_bounding_client_rect();
    input::client_to_local(
        ev.client_x() as f32,
        ev.client_y() as f32,
        rect.left() as f32,
        rect.top() as f32,
    )
}

fn listen<E, F>(target: &web::EventTarget, name: &str, handler: F)
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
        log::warn!("failed to listen for {}: {:?}", name, e);
    }
    closure.forget();
}

pub fn wire_input_handlers(w: InputWiring) {
    let target: web::EventTarget = w.canvas.clone().into();

    // pointermove: hover sample, plus orbit while a button is held
    {
        let canvas = w.canvas.clone();
        let viewer = w.viewer.clone();
        let drag = w.drag.clone();
        listen(&target, "pointermove", move |ev: web::PointerEvent| {
            let [x, y] = local_pos(&ev, &canvas);
            let (css_w, css_h) = dom::canvas_css_size(&canvas);
            let mut v = viewer.borrow_mut();
            v.on_pointer_move(PointerSample {
                x,
                y,
                width: css_w as f32,
                height: css_h as f32,
            });
            if let Some((mode, dx, dy)) = drag.borrow_mut().on_move(x, y) {
                match mode {
                    DragMode::Rotate => v.on_rotate_drag(dx, dy, css_h as f32),
                    DragMode::Pan => v.on_pan_drag(dx, dy, css_h as f32),
                }
            }
        });
    }

    // pointerdown
    {
        let canvas = w.canvas.clone();
        let drag = w.drag.clone();
        listen(&target, "pointerdown", move |ev: web::PointerEvent| {
            let [x, y] = local_pos(&ev, &canvas);
            let mode = input::drag_mode_for(ev.button(), ev.shift_key());
            drag.borrow_mut().press(x, y, mode);
            let _ = canvas.set_pointer_capture(ev.pointer_id());
        });
    }

    // pointerup: a primary press that barely moved is a click
    {
        let canvas = w.canvas.clone();
        let viewer = w.viewer.clone();
        let drag = w.drag.clone();
        listen(&target, "pointerup", move |ev: web::PointerEvent| {
            let [x, y] = local_pos(&ev, &canvas);
            let was_click = drag.borrow_mut().release(x, y);
            let _ = canvas.release_pointer_capture(ev.pointer_id());
            if was_click && ev.button() == 0 {
                viewer.borrow_mut().on_click();
            }
        });
    }

    {
        let drag = w.drag.clone();
        listen(&target, "pointercancel", move |_ev: web::PointerEvent| {
            drag.borrow_mut().cancel();
        });
    }

    {
        let viewer = w.viewer.clone();
        listen(&target, "pointerleave", move |_ev: web::PointerEvent| {
            viewer.borrow_mut().on_pointer_leave();
        });
    }

    {
        let viewer = w.viewer.clone();
        listen(&target, "wheel", move |ev: web::WheelEvent| {
            ev.prevent_default();
            viewer.borrow_mut().on_wheel(ev.delta_y() as f32);
        });
    }

    // right-drag pans, so keep the browser menu out of the way
    listen(&target, "contextmenu", move |ev: web::Event| {
        ev.prevent_default();
    });
}
