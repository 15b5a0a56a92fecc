use super::{notice::Notice, pathfinding_view::PathfindingView, sorting_view::SortingView};
use yew::prelude::*;
use yew_algo_visualizer::config::Settings;

#[derive(PartialEq, Clone, Copy)]
enum View {
    Sorting,
    Pathfinding,
}

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub settings: Settings,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let view = use_state(|| View::Sorting);
    let notice = use_state(|| None::<String>);

    let on_notice = {
        let notice = notice.clone();
        Callback::from(move |msg: String| notice.set(Some(msg)))
    };
    let on_dismiss = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };
    // switching unmounts the old view, which drops its timers
    let to_sorting = {
        let view = view.clone();
        let notice = notice.clone();
        Callback::from(move |_| {
            notice.set(None);
            view.set(View::Sorting);
        })
    };
    let to_pathfinding = {
        let view = view.clone();
        let notice = notice.clone();
        Callback::from(move |_| {
            notice.set(None);
            view.set(View::Pathfinding);
        })
    };

    let tab_style = |active: bool| {
        if active {
            "padding:4px 10px; background:#1f6feb; color:#fff; border:1px solid #1f6feb;"
        } else {
            "padding:4px 10px;"
        }
    };

    let content = match *view {
        View::Sorting => html! { <SortingView settings={props.settings.clone()} on_notice={on_notice.clone()} /> },
        View::Pathfinding => html! { <PathfindingView settings={props.settings.clone()} on_notice={on_notice.clone()} /> },
    };

    html! {
        <div id="root" style="position:relative;">
            <div id="top-bar" style="display:flex; gap:8px; padding:8px 12px; background:#161b22; border-bottom:1px solid #30363d;">
                <button onclick={to_sorting} style={tab_style(*view == View::Sorting)}>{"Sorting"}</button>
                <button onclick={to_pathfinding} style={tab_style(*view == View::Pathfinding)}>{"Pathfinding"}</button>
            </div>
            <div style="position:relative;">
                { content }
                <Notice message={(*notice).clone()} {on_dismiss} />
            </div>
        </div>
    }
}
