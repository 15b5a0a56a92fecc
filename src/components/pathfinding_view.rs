use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, MouseEvent};
use yew::prelude::*;

use gloo::events::EventListener;
use yew_algo_visualizer::algorithms::search_registry;
use yew_algo_visualizer::config::{GRID_HEIGHT_RANGE, GRID_WIDTH_RANGE, SPEED_RANGE, Settings};
use yew_algo_visualizer::engine::GridVisualizer;
use yew_algo_visualizer::model::CellKind;
use yew_algo_visualizer::util::clog;

use super::canvas_view::{ViewHandles, ViewStatus, on_space};
use super::{controls_panel::ControlsPanel, legend_panel::LegendPanel, slider::Slider};
use crate::browser::IntervalScheduler;

type Viz = GridVisualizer<IntervalScheduler>;

/// Canvas mouse listeners; removed again when dropped.
struct MouseListeners {
    canvas: HtmlCanvasElement,
    mousedown_cb: Closure<dyn FnMut(MouseEvent)>,
    mousemove_cb: Closure<dyn FnMut(MouseEvent)>,
    contextmenu_cb: Closure<dyn FnMut(MouseEvent)>,
    // release may happen outside the canvas
    _mouseup: Option<EventListener>,
}

impl MouseListeners {
    fn attach(canvas: HtmlCanvasElement, handles: &ViewHandles<Viz>) -> Self {
        let mousedown_cb = {
            let handles = handles.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                if e.button() != 0 {
                    return;
                }
                let (x, y) = (e.offset_x() as f64, e.offset_y() as f64);
                handles.update(|v| v.pointer_down(x, y));
            }) as Box<dyn FnMut(_)>)
        };
        let mousemove_cb = {
            let handles = handles.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                let (x, y) = (e.offset_x() as f64, e.offset_y() as f64);
                let pressed = e.buttons() & 1 == 1;
                handles.update(|v| v.pointer_move(x, y, pressed));
            }) as Box<dyn FnMut(_)>)
        };
        let contextmenu_cb = Closure::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
            .ok();
        canvas
            .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
            .ok();
        canvas
            .add_event_listener_with_callback(
                "contextmenu",
                contextmenu_cb.as_ref().unchecked_ref(),
            )
            .ok();
        let _mouseup = web_sys::window().map(|window| {
            let handles = handles.clone();
            EventListener::new(&window, "mouseup", move |_| {
                handles.update(|v| {
                    v.pointer_up();
                    false
                });
            })
        });
        Self {
            canvas,
            mousedown_cb,
            mousemove_cb,
            contextmenu_cb,
            _mouseup,
        }
    }
}

impl Drop for MouseListeners {
    fn drop(&mut self) {
        let _ = self.canvas.remove_event_listener_with_callback(
            "mousedown",
            self.mousedown_cb.as_ref().unchecked_ref(),
        );
        let _ = self.canvas.remove_event_listener_with_callback(
            "mousemove",
            self.mousemove_cb.as_ref().unchecked_ref(),
        );
        let _ = self.canvas.remove_event_listener_with_callback(
            "contextmenu",
            self.contextmenu_cb.as_ref().unchecked_ref(),
        );
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct PathfindingViewProps {
    pub settings: Settings,
    pub on_notice: Callback<String>,
}

#[function_component(PathfindingView)]
pub fn pathfinding_view(props: &PathfindingViewProps) -> Html {
    let settings = &props.settings;
    let canvas_ref = use_node_ref();
    let viz = use_mut_ref(|| None::<Viz>);
    let surface = use_mut_ref(|| None);
    let toggle_ref = use_mut_ref(|| None::<Callback<()>>);
    let status = use_state_eq(ViewStatus::default);
    let grid_width = use_state(|| settings.grid_width);
    let grid_height = use_state(|| settings.grid_height);
    let speed = use_state(|| settings.speed_ms);
    let algorithm = use_state(|| settings.search_algorithm.clone());
    let brush = use_state(|| CellKind::Wall);

    let handles = ViewHandles {
        viz,
        surface,
        status: status.clone(),
        on_notice: props.on_notice.clone(),
    };

    {
        let canvas_ref = canvas_ref.clone();
        let handles = handles.clone();
        let toggle_ref = toggle_ref.clone();
        let (w, h, gutter) = (settings.grid_width, settings.grid_height, settings.gutter);
        use_effect_with((), move |_| {
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            let mouse = canvas.map(|canvas| {
                handles.mount(canvas.clone(), |s, scheduler| {
                    GridVisualizer::init_canvas(s, w, h, gutter, scheduler)
                });
                MouseListeners::attach(canvas, &handles)
            });
            let listeners = (handles.on_resize(), on_space(toggle_ref));
            move || {
                drop(mouse);
                drop(listeners);
                handles.unmount();
            }
        });
    }

    let on_toggle = {
        let handles = handles.clone();
        let key = (*algorithm).clone();
        let speed_ms = *speed;
        Callback::from(move |_| {
            let notice = handles.apply_with(|v, _| {
                if v.is_running() {
                    v.stop();
                    return Ok(None);
                }
                let outcome = v.start(&key, speed_ms)?;
                clog(&format!("search {key}: {outcome:?}"));
                Ok(outcome.notice())
            });
            handles.report(notice.flatten());
        })
    };
    *toggle_ref.borrow_mut() = Some(on_toggle.clone());

    let on_step = {
        let handles = handles.clone();
        let key = (*algorithm).clone();
        Callback::from(move |_| {
            let outcome = handles.apply_with(|v, _| v.step(&key));
            handles.report(outcome.and_then(|o| o.notice()));
        })
    };
    let on_finish = {
        let handles = handles.clone();
        let key = (*algorithm).clone();
        Callback::from(move |_| {
            let outcome = handles.apply_with(|v, _| {
                let outcome = v.solve(&key)?;
                clog(&format!("search {key} to completion: {outcome:?}"));
                Ok(outcome)
            });
            handles.report(outcome.and_then(|o| o.notice()));
        })
    };
    let on_select = {
        let handles = handles.clone();
        let algorithm = algorithm.clone();
        Callback::from(move |key: String| {
            algorithm.set(key);
            handles.apply(|v, _| {
                v.stop();
                Ok(())
            });
        })
    };
    let on_brush = {
        let handles = handles.clone();
        let brush = brush.clone();
        Callback::from(move |kind: CellKind| {
            brush.set(kind);
            handles.update(|v| {
                v.set_brush(kind);
                false
            });
        })
    };
    let on_clear_path = {
        let handles = handles.clone();
        Callback::from(move |_| {
            handles.apply(|v, _| {
                v.clear_visited();
                Ok(())
            })
        })
    };
    let on_reset = {
        let handles = handles.clone();
        Callback::from(move |_| {
            handles.apply(|v, _| {
                v.reset_grid();
                Ok(())
            })
        })
    };
    let on_width = {
        let handles = handles.clone();
        let grid_width = grid_width.clone();
        let h = *grid_height;
        Callback::from(move |w: u32| {
            grid_width.set(w);
            handles.apply(|v, s| {
                v.resize_grid(w, h)?;
                v.resize(s);
                Ok(())
            });
        })
    };
    let on_height = {
        let handles = handles.clone();
        let grid_height = grid_height.clone();
        let w = *grid_width;
        Callback::from(move |h: u32| {
            grid_height.set(h);
            handles.apply(|v, s| {
                v.resize_grid(w, h)?;
                v.resize(s);
                Ok(())
            });
        })
    };
    let on_speed = {
        let handles = handles.clone();
        let speed = speed.clone();
        Callback::from(move |ms: u32| {
            speed.set(ms);
            let outcome = handles.apply_with(|v, _| v.change_speed(ms));
            handles.report(outcome.flatten().and_then(|o| o.notice()));
        })
    };

    let algorithms: Vec<_> = search_registry().entries().collect();

    html! {
        <div style="position:relative; width:100%;">
            <div style="width:100%;">
                <canvas ref={canvas_ref} style="display:block; cursor:crosshair;"></canvas>
            </div>
            <ControlsPanel
                {algorithms}
                selected={(*algorithm).clone()}
                {on_select}
                running={status.running}
                {on_toggle}
                {on_step}
                finish_label="Solve"
                {on_finish}
            >
                <button onclick={on_clear_path}>{"Clear path"}</button>
                <button onclick={on_reset}>{"Clear grid"}</button>
                <Slider label="Columns" range={GRID_WIDTH_RANGE} value={*grid_width} default={settings.grid_width} on_change={on_width} />
                <Slider label="Rows" range={GRID_HEIGHT_RANGE} value={*grid_height} default={settings.grid_height} on_change={on_height} />
                <Slider label="Delay" range={SPEED_RANGE} value={*speed} unit="ms" default={settings.speed_ms} on_change={on_speed} />
            </ControlsPanel>
            <LegendPanel brush={*brush} {on_brush} visited={status.visited} />
            <div style="position:absolute; left:12px; bottom:12px; font-size:12px; opacity:0.8;">
                { if status.solved { "Solved" } else if status.running { "Searching..." } else { "Draw walls, place a start and an end" } }
            </div>
        </div>
    }
}
