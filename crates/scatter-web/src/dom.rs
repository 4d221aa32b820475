use scatter_core::{Tooltip, ViewerState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const NOTICE_STYLE: &str = "position:absolute;left:12px;top:80px;padding:8px 12px;\
background:rgba(255,80,80,0.12);color:#ffb3b3;border:1px solid rgba(255,80,80,0.18);\
border-radius:6px;font-size:13px;z-index:1001";
const TOOLTIP_STYLE: &str = "position:absolute;pointer-events:none;padding:4px 8px;\
background:rgba(0,0,0,0.75);color:#fff;border-radius:4px;font-size:13px;z-index:1002";

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Layout size of the canvas in CSS pixels; zero before layout.
#[inline]
pub fn canvas_css_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    (
        canvas.client_width().max(0) as u32,
        canvas.client_height().max(0) as u32,
    )
}

fn create_div(document: &web::Document) -> anyhow::Result<web::HtmlElement> {
    document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!("create_element: {:?}", e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("not an HtmlElement: {:?}", e))
}

fn append_to_body(document: &web::Document, el: &web::HtmlElement) -> anyhow::Result<()> {
    let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
    body.append_child(el)
        .map_err(|e| anyhow::anyhow!("append_child: {:?}", e))?;
    Ok(())
}

/// Non-blocking warning shown once when the fallback data is in use.
pub fn show_notice(document: &web::Document, message: &str) -> anyhow::Result<()> {
    let notice = create_div(document)?;
    notice.set_class_name("notice");
    let _ = notice.set_attribute("style", NOTICE_STYLE);
    notice.set_text_content(Some(message));
    append_to_body(document, &notice)
}

/// One entry per marker; activating an entry queues a focus request by name.
pub fn build_sidebar(
    document: &web::Document,
    viewer: &Rc<RefCell<ViewerState>>,
) -> anyhow::Result<()> {
    let sidebar = create_div(document)?;
    sidebar.set_id("sidebar");
    let heading = document
        .create_element("h3")
        .map_err(|e| anyhow::anyhow!("create_element: {:?}", e))?;
    heading.set_text_content(Some("Collections"));
    let _ = sidebar.append_child(&heading);

    let names: Vec<String> = viewer.borrow().registry.iter().map(|m| m.name.clone()).collect();
    for name in names {
        let item = create_div(document)?;
        item.set_class_name("col-item");
        item.set_text_content(Some(&name));
        let viewer_click = viewer.clone();
        let closure = Closure::wrap(Box::new(move || {
            viewer_click.borrow_mut().request_focus(&name);
        }) as Box<dyn FnMut()>);
        let _ = item.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
        let _ = sidebar.append_child(&item);
    }
    append_to_body(document, &sidebar)
}

/// Reuse `#tooltip` from the page if present, otherwise create it.
pub fn ensure_tooltip(document: &web::Document) -> anyhow::Result<web::HtmlElement> {
    if let Some(el) = document.get_element_by_id("tooltip") {
        if let Ok(html) = el.dyn_into::<web::HtmlElement>() {
            return Ok(html);
        }
    }
    let tooltip = create_div(document)?;
    tooltip.set_id("tooltip");
    let _ = tooltip.set_attribute("style", &format!("{TOOLTIP_STYLE};display:none"));
    append_to_body(document, &tooltip)?;
    Ok(tooltip)
}

pub fn update_tooltip(el: &web::HtmlElement, tooltip: Option<&Tooltip>) {
    let style = el.style();
    match tooltip {
        Some(t) => {
            let _ = style.set_property("display", "block");
            let _ = style.set_property("left", &format!("{}px", t.x));
            let _ = style.set_property("top", &format!("{}px", t.y));
            if el.inner_text() != t.text {
                el.set_inner_text(&t.text);
            }
        }
        None => {
            let _ = style.set_property("display", "none");
        }
    }
}

#[inline]
pub fn alert(message: &str) {
    if let Some(w) = web::window() {
        let _ = w.alert_with_message(message);
    }
}
