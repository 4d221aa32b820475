use crate::dom;
use crate::render;
use scatter_core::{
    label_instances, scene_uniforms, sphere_instances, LabelInstance, LineVertex, SurfaceSize,
    ViewerState,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub viewer: Rc<RefCell<ViewerState>>,
    pub canvas: web::HtmlCanvasElement,
    pub tooltip: web::HtmlElement,
    pub gpu: Option<render::GpuState>,
    pub last_instant: Instant,
    /// Fixed-size axis labels, drawn after the marker labels.
    pub axis_instances: Vec<LabelInstance>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // Scene math runs in CSS pixels so label sizes match what the user sees.
        let (css_w, css_h) = dom::canvas_css_size(&self.canvas);
        let surface = SurfaceSize {
            width: css_w,
            height: css_h,
        };

        let (out, uniforms, spheres, mut labels, selected_name) = {
            let mut viewer = self.viewer.borrow_mut();
            let out = viewer.frame(dt, surface);
            let uniforms = scene_uniforms(&viewer.camera);
            let spheres = sphere_instances(&viewer.registry, viewer.config.marker_radius);
            let labels = label_instances(&viewer.registry);
            let selected_name = out
                .selected
                .and_then(|id| viewer.registry.get(id))
                .map(|m| m.name.clone());
            (out, uniforms, spheres, labels, selected_name)
        };

        dom::update_tooltip(&self.tooltip, out.tooltip.as_ref());

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            labels.extend_from_slice(&self.axis_instances);
            if let Err(e) = g.render(&uniforms, &spheres, &labels) {
                log::error!("render error: {:?}", e);
            }
        }

        // alert blocks, so the viewer must not be borrowed here
        if let Some(name) = selected_name {
            log::info!("selected {}", name);
            dom::alert(&format!("Selected: {}", name));
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    axes: &[LineVertex],
) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, axes).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
