use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    /// `(key, label)` for every registered algorithm.
    pub algorithms: Vec<(&'static str, &'static str)>,
    pub selected: String,
    pub on_select: Callback<String>,
    pub running: bool,
    pub on_toggle: Callback<()>,
    pub on_step: Callback<()>,
    pub finish_label: &'static str,
    pub on_finish: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ControlsPanel)]
pub fn controls_panel(props: &ControlsPanelProps) -> Html {
    let select_cb = {
        let cb = props.on_select.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            cb.emit(select.value());
        })
    };
    let toggle_cb = {
        let cb = props.on_toggle.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let step_cb = {
        let cb = props.on_step.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let finish_cb = {
        let cb = props.on_finish.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_label = if props.running { "Stop" } else { "Start" };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px;">
        <select onchange={select_cb}>
            { for props.algorithms.iter().map(|(key, label)| html! {
                <option value={*key} selected={props.selected == *key}>{ *label }</option>
            }) }
        </select>
        <button onclick={toggle_cb}>{ toggle_label }</button>
        <button onclick={step_cb}>{"Step"}</button>
        <button onclick={finish_cb}>{ props.finish_label }</button>
        { props.children.clone() }
        <div style="font-size:11px; opacity:0.7;">{"Hotkey: Space start/stop"}</div>
    </div>}
}
