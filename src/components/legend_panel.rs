use super::legend::LegendRow;
use yew::prelude::*;
use yew_algo_visualizer::model::{CellKind, cell_color};

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    pub brush: CellKind,
    pub on_brush: Callback<CellKind>,
    pub visited: usize,
}

fn label(kind: CellKind) -> &'static str {
    match kind {
        CellKind::Empty => "Erase",
        CellKind::Start => "Start",
        CellKind::Checkpoint => "Checkpoint",
        CellKind::End => "End",
        CellKind::Wall => "Wall",
    }
}

/// Cell colours, doubling as the brush picker.
#[function_component(LegendPanel)]
pub fn legend_panel(props: &LegendPanelProps) -> Html {
    html! {<div style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:150px;">
        <div style="font-weight:600; margin-bottom:4px;">{"Brush"}</div>
        { for CellKind::ALL.iter().map(|&kind| {
            let on_brush = props.on_brush.clone();
            html! { <LegendRow
                color={cell_color(kind, false)}
                label={label(kind)}
                selected={props.brush == kind}
                on_select={Callback::from(move |_| on_brush.emit(kind))}
            /> }
        }) }
        <div style="display:flex; align-items:center; gap:8px; margin:6px 0 0 4px; font-size:11px; color:#8b949e;">
            <span style={format!("display:inline-block; width:12px; height:12px; background:{};", cell_color(CellKind::Empty, true))}></span>
            <span>{ format!("Visited: {}", props.visited) }</span>
        </div>
    </div>}
}
