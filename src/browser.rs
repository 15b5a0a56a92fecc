// Canvas and setInterval backed implementations of the engine's host seams.
use std::collections::HashMap;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use yew_algo_visualizer::controller::{Scheduler, TimerId};
use yew_algo_visualizer::geometry::Surface;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn container_width(&self) -> u32 {
        self.canvas
            .parent_element()
            .map(|p| p.client_width().max(0) as u32)
            .unwrap_or(0)
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }
}

pub type TickSink = Rc<dyn Fn(TimerId)>;

/// One `setInterval` per live timer. Each tick reports its id to the sink.
pub struct IntervalScheduler {
    next_id: u64,
    live: HashMap<TimerId, Interval>,
    // Cancelled callbacks are parked here: a timer may be cancelled from inside its own tick.
    retired: Vec<Closure<dyn FnMut()>>,
    sink: TickSink,
}

impl IntervalScheduler {
    pub fn new(sink: TickSink) -> Self {
        Self {
            next_id: 0,
            live: HashMap::new(),
            retired: Vec::new(),
            sink,
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&mut self, period_ms: u32) -> TimerId {
        self.retired.clear();
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let sink = self.sink.clone();
        let interval = Interval::new(period_ms, move || sink(id));
        self.live.insert(id, interval);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(interval) = self.live.remove(&id) {
            self.retired.push(interval.cancel());
        }
    }
}
