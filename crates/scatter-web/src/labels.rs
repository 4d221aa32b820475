//! Rasterize label text into RGBA bitmaps with a 2D canvas.

use scatter_core::{LabelMetrics, LABEL_BORDER_PX};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

const FONT_FACE: &str = "Arial";

#[derive(Clone, Debug)]
pub struct LabelBitmap {
    pub metrics: LabelMetrics,
    pub rgba: Vec<u8>,
}

impl LabelBitmap {
    /// Fully transparent bitmap, used when rasterizing fails.
    pub fn blank(metrics: LabelMetrics) -> Self {
        let len = metrics.width_px as usize * metrics.height_px as usize * 4;
        Self {
            metrics,
            rgba: vec![0; len],
        }
    }
}

pub struct LabelRasterizer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

fn set_style(ctx: &web::CanvasRenderingContext2d, prop: &str, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str(prop),
        &JsValue::from_str(value),
    );
}

impl LabelRasterizer {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx })
    }

    /// White text with a dark outline on a transparent background.
    pub fn rasterize(&self, text: &str, font_px: f32) -> anyhow::Result<LabelBitmap> {
        let font = format!("{}px {}", font_px, FONT_FACE);
        self.ctx.set_font(&font);
        let measured = self
            .ctx
            .measure_text(text)
            .map_err(|e| anyhow::anyhow!("measure_text: {:?}", e))?;
        let metrics = LabelMetrics::from_text_width(measured.width() as f32, font_px, LABEL_BORDER_PX);

        // resizing resets the context state
        self.canvas.set_width(metrics.width_px);
        self.canvas.set_height(metrics.height_px);
        let (w, h) = (metrics.width_px as f64, metrics.height_px as f64);
        self.ctx.set_font(&font);
        self.ctx.set_text_baseline("top");
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_line_width((font_px * 0.08).floor().max(2.0) as f64);
        set_style(&self.ctx, "strokeStyle", "rgba(0,0,0,0.9)");
        set_style(&self.ctx, "fillStyle", "white");
        let pad = (LABEL_BORDER_PX * 2.0) as f64;
        let _ = self.ctx.stroke_text(text, pad, pad);
        let _ = self.ctx.fill_text(text, pad, pad);

        let image = self
            .ctx
            .get_image_data(0.0, 0.0, w, h)
            .map_err(|e| anyhow::anyhow!("get_image_data: {:?}", e))?;
        Ok(LabelBitmap {
            metrics,
            rgba: image.data().0,
        })
    }

    /// Rasterize, falling back to an estimated blank bitmap on failure.
    pub fn rasterize_or_blank(&self, text: &str, font_px: f32) -> LabelBitmap {
        match self.rasterize(text, font_px) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("label {:?} not rasterized: {:?}", text, e);
                LabelBitmap::blank(LabelMetrics::estimate(text, font_px, LABEL_BORDER_PX))
            }
        }
    }
}
