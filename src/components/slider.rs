use web_sys::HtmlInputElement;
use yew::prelude::*;

use yew_algo_visualizer::util::snap;

#[derive(Properties, PartialEq, Clone)]
pub struct SliderProps {
    pub label: &'static str,
    /// `(min, max, step)`
    pub range: (u32, u32, u32),
    pub value: u32,
    #[prop_or_default]
    pub unit: &'static str,
    /// Value restored by the reset button; no button when `None`.
    #[prop_or_default]
    pub default: Option<u32>,
    pub on_change: Callback<u32>,
}

#[function_component(Slider)]
pub fn slider(props: &SliderProps) -> Html {
    let (min, max, step) = props.range;
    let oninput = {
        let cb = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(v) = input.value().parse::<u32>() {
                cb.emit(snap(v, min, max, step));
            }
        })
    };
    let reset = props.default.map(|value| {
        let cb = props.on_change.clone();
        let onclick = Callback::from(move |_: MouseEvent| cb.emit(value));
        html! { <button {onclick} style="padding:0 6px; font-size:11px;">{"reset"}</button> }
    });
    html! {<label style="display:flex; flex-direction:column; gap:2px; font-size:12px;">
        <span style="display:flex; justify-content:space-between; gap:6px;">
            <span>{ format!("{}: {}{}", props.label, props.value, props.unit) }</span>
            { reset.unwrap_or_default() }
        </span>
        <input type="range"
            min={min.to_string()}
            max={max.to_string()}
            step={step.to_string()}
            value={props.value.to_string()}
            {oninput} />
    </label>}
}
