/// Spincube Web - canvas 2D frontend compiled to WASM
///
/// Draws the cube on an `HtmlCanvasElement` through its 2D context and keeps
/// the animation going with `setTimeout`, one frame per callback.
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use spincube_core::{Animation, Color, Mesh, RenderMode, RenderStyle, Renderer, ScreenPoint, Surface, CUBE_SIZE};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`Surface`] backed by a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Look up a canvas by element id, size it to the viewport and grab its 2D context.
    pub fn from_canvas_id(canvas_id: &str, width: u32, height: u32) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id `{canvas_id}`")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("`{canvas_id}` is not a canvas")))?;

        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self::new(ctx))
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(x.into(), y.into(), w.into(), h.into());
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, width: f32, color: Color) {
        self.ctx.set_line_width(width.into());
        self.ctx.set_stroke_style_str(&color.to_hex());
        self.ctx.begin_path();
        self.ctx.move_to(from.x.into(), from.y.into());
        self.ctx.line_to(to.x.into(), to.y.into());
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(x.into(), y.into(), w.into(), h.into());
    }
}

/// Map the JS-facing mode name onto a [`RenderMode`].
pub fn parse_mode(mode: &str) -> Result<RenderMode, String> {
    match mode.to_ascii_lowercase().as_str() {
        "" | "wireframe" => Ok(RenderMode::Wireframe),
        "points" | "point-cloud" | "pointcloud" => Ok(RenderMode::PointCloud),
        other => Err(format!("unknown render mode `{other}`")),
    }
}

struct Runner {
    animation: Animation,
    surface: CanvasSurface,
    running: bool,
    timer: Option<i32>,
}

type TickCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn set_timeout(callback: &Closure<dyn FnMut()>, delay: Duration) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), millis)
}

fn clear_timeout(handle: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(handle);
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    runner: Rc<RefCell<Runner>>,
    tick: TickCallback,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the canvas with id `canvas_id`. `mode` is `"wireframe"` or
    /// `"points"`; `spin` also rotates the wireframe.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, mode: &str, spin: bool) -> Result<WebRenderer, JsValue> {
        let mode = parse_mode(mode).map_err(|e| JsValue::from_str(&e))?;
        let renderer = Renderer::new(mode).with_style(RenderStyle {
            spin_wireframe: spin,
            ..RenderStyle::default()
        });
        let viewport = renderer.viewport;
        let surface = CanvasSurface::from_canvas_id(canvas_id, viewport.width, viewport.height)?;

        debug!(canvas_id, ?mode, "attached to canvas");

        Ok(WebRenderer {
            runner: Rc::new(RefCell::new(Runner {
                animation: Animation::new(Mesh::cube(CUBE_SIZE), renderer),
                surface,
                running: false,
                timer: None,
            })),
            tick: Rc::new(RefCell::new(None)),
        })
    }

    /// Schedule the first frame one frame delay from now; every frame then
    /// schedules the next one. Calling `start` while running does nothing.
    pub fn start(&mut self) -> Result<(), JsValue> {
        let delay = {
            let mut runner = self.runner.borrow_mut();
            if runner.running {
                return Ok(());
            }
            runner.running = true;
            runner.animation.frame_delay()
        };

        if self.tick.borrow().is_none() {
            let runner = Rc::clone(&self.runner);
            let tick: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&self.tick);
            *self.tick.borrow_mut() = Some(Closure::new(move || {
                let mut runner = runner.borrow_mut();
                if !runner.running {
                    return;
                }
                let Runner {
                    animation, surface, ..
                } = &mut *runner;
                animation.step(surface);

                let delay = runner.animation.frame_delay();
                runner.timer = match tick.upgrade() {
                    Some(cell) => {
                        let callback = cell.borrow();
                        let next = callback.as_ref().and_then(|cb| set_timeout(cb, delay).ok());
                        next
                    }
                    None => None,
                };
            }));
        }

        let handle = match self.tick.borrow().as_ref() {
            Some(callback) => set_timeout(callback, delay)?,
            None => return Err(JsValue::from_str("frame callback missing")),
        };
        self.runner.borrow_mut().timer = Some(handle);

        info!(fps = self.fps(), "animation started");
        Ok(())
    }

    /// Cancel the pending frame.
    pub fn stop(&mut self) {
        let mut runner = self.runner.borrow_mut();
        runner.running = false;
        if let Some(handle) = runner.timer.take() {
            clear_timeout(handle);
        }
        info!("animation stopped");
    }

    /// Run a single frame step right away.
    pub fn render(&mut self) {
        let mut runner = self.runner.borrow_mut();
        let Runner {
            animation, surface, ..
        } = &mut *runner;
        animation.step(surface);
    }

    pub fn angle(&self) -> f32 {
        self.runner.borrow().animation.state().angle
    }

    pub fn fps(&self) -> u32 {
        self.runner.borrow().animation.fps()
    }

    pub fn running(&self) -> bool {
        self.runner.borrow().running
    }
}

impl Drop for WebRenderer {
    fn drop(&mut self) {
        self.stop();
    }
}
