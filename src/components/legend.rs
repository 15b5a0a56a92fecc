use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendRowProps {
    pub color: &'static str,
    pub label: &'static str,
    #[prop_or(false)]
    pub selected: bool,
    pub on_select: Callback<()>,
}

#[function_component(LegendRow)]
pub fn legend_row(props: &LegendRowProps) -> Html {
    let select_cb = {
        let cb = props.on_select.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let border = if props.selected { "#58a6ff" } else { "transparent" };
    html! { <div onclick={select_cb} style={format!("display:flex; align-items:center; gap:8px; margin:3px 0; padding:2px 4px; cursor:pointer; border:1px solid {}; border-radius:4px;", border)}> <span style={format!("display:inline-block; width:12px; height:12px; background:{}; border:1px solid #30363d; border-radius:2px;", props.color)}></span> <span>{ props.label }</span> </div> }
}
