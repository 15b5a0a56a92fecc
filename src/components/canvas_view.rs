// Plumbing shared by the two canvas views: the visualizer slot, timer ticks, window listeners.
use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, KeyboardEvent};
use yew::prelude::*;

use yew_algo_visualizer::controller::{TickOutcome, TimerId};
use yew_algo_visualizer::engine::{GridVisualizer, SortingVisualizer};
use yew_algo_visualizer::error::{EngineError, Result};
use yew_algo_visualizer::util::cwarn;

use crate::browser::{CanvasSurface, IntervalScheduler, TickSink};

pub type Shared<T> = Rc<RefCell<Option<T>>>;

/// What the status line and legend show; re-rendered whenever it changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewStatus {
    pub running: bool,
    pub solved: bool,
    pub visited: usize,
}

/// What a canvas view needs from its visualizer.
pub trait Animated {
    fn tick(&mut self, timer: TimerId) -> TickOutcome;
    fn draw(&mut self, surface: &mut CanvasSurface);
    fn refit(&mut self, surface: &mut CanvasSurface);
    fn status(&self) -> ViewStatus;
}

impl Animated for SortingVisualizer<IntervalScheduler> {
    fn tick(&mut self, timer: TimerId) -> TickOutcome {
        SortingVisualizer::tick(self, timer)
    }
    fn draw(&mut self, surface: &mut CanvasSurface) {
        SortingVisualizer::draw(self, surface);
    }
    fn refit(&mut self, surface: &mut CanvasSurface) {
        self.resize(surface);
    }
    fn status(&self) -> ViewStatus {
        ViewStatus {
            running: self.is_running(),
            solved: self.check_solved(),
            visited: 0,
        }
    }
}

impl Animated for GridVisualizer<IntervalScheduler> {
    fn tick(&mut self, timer: TimerId) -> TickOutcome {
        GridVisualizer::tick(self, timer)
    }
    fn draw(&mut self, surface: &mut CanvasSurface) {
        GridVisualizer::draw(self, surface);
    }
    fn refit(&mut self, surface: &mut CanvasSurface) {
        self.resize(surface);
    }
    fn status(&self) -> ViewStatus {
        ViewStatus {
            running: self.is_running(),
            solved: self.check_solved(),
            visited: self.grid().visited_count(),
        }
    }
}

/// Handles a view's callbacks share. Cloning is cheap.
pub struct ViewHandles<V> {
    pub viz: Shared<V>,
    pub surface: Shared<CanvasSurface>,
    pub status: UseStateHandle<ViewStatus>,
    pub on_notice: Callback<String>,
}

impl<V> Clone for ViewHandles<V> {
    fn clone(&self) -> Self {
        Self {
            viz: self.viz.clone(),
            surface: self.surface.clone(),
            status: self.status.clone(),
            on_notice: self.on_notice.clone(),
        }
    }
}

impl<V: Animated + 'static> ViewHandles<V> {
    fn with<R>(&self, f: impl FnOnce(&mut V, &mut CanvasSurface) -> R) -> Option<R> {
        let mut viz = self.viz.borrow_mut();
        let mut surface = self.surface.borrow_mut();
        Some(f(viz.as_mut()?, surface.as_mut()?))
    }

    pub fn notify(&self, err: &EngineError) {
        cwarn(&err.to_string());
        self.on_notice.emit(err.notice());
    }

    pub fn report(&self, notice: Option<&str>) {
        if let Some(msg) = notice {
            self.on_notice.emit(msg.to_string());
        }
    }

    /// Run a user action, redraw, and mirror the view status into the UI.
    pub fn apply(&self, f: impl FnOnce(&mut V, &mut CanvasSurface) -> Result<()>) {
        self.apply_with(f);
    }

    /// [`Self::apply`] that hands back the action's value. Errors become a notice and `None`.
    pub fn apply_with<T>(
        &self,
        f: impl FnOnce(&mut V, &mut CanvasSurface) -> Result<T>,
    ) -> Option<T> {
        let (result, status) = self.with(|v, s| {
            let result = f(v, s);
            v.draw(s);
            (result, v.status())
        })?;
        // borrows are released before the state update may re-render
        self.status.set(status);
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.notify(&err);
                None
            }
        }
    }

    /// Like [`Self::apply`], but only redraws when `f` reports a change.
    pub fn update(&self, f: impl FnOnce(&mut V) -> bool) {
        let changed = self.with(|v, s| {
            let changed = f(v);
            if changed {
                v.draw(s);
            }
            (changed, v.status())
        });
        if let Some((true, status)) = changed {
            self.status.set(status);
        }
    }

    fn tick_sink(&self) -> TickSink {
        // the scheduler lives inside the visualizer, so the sink must not keep it alive
        let viz = Rc::downgrade(&self.viz);
        let surface = self.surface.clone();
        let status = self.status.clone();
        let on_notice = self.on_notice.clone();
        Rc::new(move |id| {
            let Some(viz) = viz.upgrade() else {
                return;
            };
            let ticked = {
                let mut viz = viz.borrow_mut();
                let mut surface = surface.borrow_mut();
                match (viz.as_mut(), surface.as_mut()) {
                    (Some(v), Some(s)) => {
                        let outcome = v.tick(id);
                        (outcome != TickOutcome::Ignored).then(|| {
                            v.draw(s);
                            (outcome, v.status())
                        })
                    }
                    _ => None,
                }
            };
            let Some((outcome, next)) = ticked else {
                return;
            };
            status.set(next);
            if let Some(msg) = outcome.notice() {
                on_notice.emit(msg.to_string());
            }
        })
    }

    /// Bind a canvas, build the visualizer with a timer scheduler, and draw the first frame.
    pub fn mount(
        &self,
        canvas: HtmlCanvasElement,
        init: impl FnOnce(&mut CanvasSurface, IntervalScheduler) -> Result<V>,
    ) {
        let Some(mut surface) = CanvasSurface::new(canvas) else {
            cwarn("canvas has no 2d context");
            return;
        };
        match init(&mut surface, IntervalScheduler::new(self.tick_sink())) {
            Ok(mut v) => {
                v.draw(&mut surface);
                let status = v.status();
                *self.viz.borrow_mut() = Some(v);
                self.status.set(status);
            }
            Err(err) => self.notify(&err),
        }
        *self.surface.borrow_mut() = Some(surface);
    }

    /// Drop the visualizer, and with it every live timer.
    pub fn unmount(&self) {
        self.viz.borrow_mut().take();
        self.surface.borrow_mut().take();
    }

    pub fn on_resize(&self) -> Option<EventListener> {
        let window = web_sys::window()?;
        let handles = self.clone();
        Some(EventListener::new(&window, "resize", move |_| {
            handles.with(|v, s| {
                v.refit(s);
                v.draw(s);
            });
        }))
    }
}

/// Space toggles start/stop through whatever callback `action` holds at the time.
pub fn on_space(action: Rc<RefCell<Option<Callback<()>>>>) -> Option<EventListener> {
    let window = web_sys::window()?;
    let options = EventListenerOptions::enable_prevent_default();
    Some(EventListener::new_with_options(
        &window,
        "keydown",
        options,
        move |e| {
            let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if e.code() != "Space" || e.repeat() {
                return;
            }
            e.prevent_default();
            let cb = action.borrow().clone();
            if let Some(cb) = cb {
                cb.emit(());
            }
        },
    ))
}
