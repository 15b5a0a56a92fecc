use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use yew_algo_visualizer::algorithms::sorting_registry;
use yew_algo_visualizer::config::{ITEM_COUNT_RANGE, MAX_HEIGHT_RANGE, SPEED_RANGE, Settings};
use yew_algo_visualizer::engine::SortingVisualizer;
use yew_algo_visualizer::util::clog;

use super::canvas_view::{ViewHandles, ViewStatus, on_space};
use super::{controls_panel::ControlsPanel, slider::Slider};
use crate::browser::IntervalScheduler;

type Viz = SortingVisualizer<IntervalScheduler>;

#[derive(Properties, PartialEq, Clone)]
pub struct SortingViewProps {
    pub settings: Settings,
    pub on_notice: Callback<String>,
}

#[function_component(SortingView)]
pub fn sorting_view(props: &SortingViewProps) -> Html {
    let settings = &props.settings;
    let canvas_ref = use_node_ref();
    let viz = use_mut_ref(|| None::<Viz>);
    let surface = use_mut_ref(|| None);
    let toggle_ref = use_mut_ref(|| None::<Callback<()>>);
    let status = use_state_eq(ViewStatus::default);
    let item_count = use_state(|| settings.item_count);
    let max_height = use_state(|| settings.max_height);
    let speed = use_state(|| settings.speed_ms);
    let algorithm = use_state(|| settings.sort_algorithm.clone());

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
        let (n, h, gutter) = (settings.item_count, settings.max_height, settings.gutter);
        use_effect_with((), move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                handles.mount(canvas, |s, scheduler| {
                    SortingVisualizer::init_canvas(s, n, h, gutter, scheduler)
                });
            }
            let listeners = (handles.on_resize(), on_space(toggle_ref));
            move || {
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
                clog(&format!("sort {key}: {outcome:?}"));
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
                let outcome = v.sort(&key)?;
                clog(&format!("sort {key} to completion: {outcome:?}"));
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
    let on_shuffle = {
        let handles = handles.clone();
        Callback::from(move |_| {
            handles.apply(|v, _| {
                v.shuffle_array(js_sys::Math::random);
                Ok(())
            })
        })
    };
    let on_reset = {
        let handles = handles.clone();
        Callback::from(move |_| {
            handles.apply(|v, _| {
                v.reset_array();
                Ok(())
            })
        })
    };
    let on_item_count = {
        let handles = handles.clone();
        let item_count = item_count.clone();
        let max = *max_height;
        Callback::from(move |n: u32| {
            item_count.set(n);
            handles.apply(|v, s| v.update_values(s, n, max).map(drop));
        })
    };
    let on_max_height = {
        let handles = handles.clone();
        let max_height = max_height.clone();
        let n = *item_count;
        Callback::from(move |max: u32| {
            max_height.set(max);
            handles.apply(|v, s| v.update_values(s, n, max).map(drop));
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

    let algorithms: Vec<_> = sorting_registry().entries().collect();

    html! {
        <div style="position:relative; width:100%;">
            <div style="width:100%;">
                <canvas ref={canvas_ref} style="display:block;"></canvas>
            </div>
            <ControlsPanel
                {algorithms}
                selected={(*algorithm).clone()}
                {on_select}
                running={status.running}
                {on_toggle}
                {on_step}
                finish_label="Sort"
                {on_finish}
            >
                <button onclick={on_shuffle}>{"Shuffle"}</button>
                <button onclick={on_reset}>{"Reset"}</button>
                <Slider label="Items" range={ITEM_COUNT_RANGE} value={*item_count} default={settings.item_count} on_change={on_item_count} />
                <Slider label="Max height" range={MAX_HEIGHT_RANGE} value={*max_height} unit="%" default={settings.max_height} on_change={on_max_height} />
                <Slider label="Delay" range={SPEED_RANGE} value={*speed} unit="ms" default={settings.speed_ms} on_change={on_speed} />
            </ControlsPanel>
            <div style="position:absolute; left:12px; bottom:12px; font-size:12px; opacity:0.8;">
                { if status.solved { "Sorted" } else if status.running { "Sorting..." } else { "Unsorted" } }
            </div>
        </div>
    }
}
