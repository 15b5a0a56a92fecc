use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NoticeProps {
    pub message: Option<String>,
    pub on_dismiss: Callback<()>,
}

/// Dismissable banner for user-facing messages ("not implemented yet", "done", missing endpoints).
#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    let Some(message) = &props.message else {
        return html! {};
    };
    let dismiss_cb = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:12px; left:50%; transform:translateX(-50%); background:rgba(0,0,0,0.85); border:1px solid #f85149; padding:8px 14px; border-radius:8px; display:flex; gap:12px; align-items:center; z-index:50;">
        <span>{ message.clone() }</span>
        <button onclick={dismiss_cb} style="padding:2px 8px; font-size:12px;">{"OK"}</button>
    </div>}
}
