#![cfg(target_arch = "wasm32")]
use instant::Instant;
use scatter_core::{
    axis_labels, axis_lines, resolve_collections, ViewerConfig, ViewerState, AXIS_LABEL_FONT_PX,
    AXIS_LEN, LABEL_FONT_PX,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod fetch;
mod frame;
mod input;
mod labels;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scatter-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::wire_canvas_resize(&canvas);

    let config = ViewerConfig::default();
    let loaded = resolve_collections(fetch::fetch_text(&window, &config.data_url).await);

    // Bitmaps are collected in registry order so they line up with the labels.
    let rasterizer = labels::LabelRasterizer::new(&document)?;
    let mut bitmaps = Vec::new();
    let mut viewer = ViewerState::new(config, loaded, |name| {
        let bitmap = rasterizer.rasterize_or_blank(name, LABEL_FONT_PX);
        let metrics = bitmap.metrics;
        bitmaps.push(bitmap);
        metrics
    });
    if let Some(notice) = viewer.take_notice() {
        if let Err(e) = dom::show_notice(&document, &notice) {
            log::warn!("notice not shown: {:?}", e);
        }
    }
    let viewer = Rc::new(RefCell::new(viewer));

    dom::build_sidebar(&document, &viewer)?;
    let tooltip = dom::ensure_tooltip(&document)?;

    let mut axis_instances = Vec::new();
    for axis in axis_labels(AXIS_LEN) {
        let bitmap = rasterizer.rasterize_or_blank(axis.text, AXIS_LABEL_FONT_PX);
        axis_instances.push(axis.instance(bitmap.metrics));
        bitmaps.push(bitmap);
    }

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        viewer: viewer.clone(),
        drag: Rc::new(RefCell::new(input::DragTracker::default())),
    });

    let mut gpu = frame::init_gpu(&canvas, &axis_lines(AXIS_LEN)).await;
    if let Some(g) = &mut gpu {
        g.set_label_textures(&bitmaps);
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        canvas,
        tooltip,
        gpu,
        last_instant: Instant::now(),
        axis_instances,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
