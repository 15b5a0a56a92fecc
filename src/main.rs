mod browser;
mod components;

use components::app::{App, AppProps};
use yew_algo_visualizer::config::Settings;
use yew_algo_visualizer::util::{clog, cwarn};

/// Mount element; its `data-config` attribute may carry a JSON [`Settings`] object.
const MOUNT_ID: &str = "app";

fn load_settings(mount: Option<&web_sys::Element>) -> Settings {
    let Some(raw) = mount.and_then(|el| el.get_attribute("data-config")) else {
        return Settings::default();
    };
    match Settings::from_json(&raw) {
        Ok(settings) => settings,
        Err(err) => {
            cwarn(&format!("ignoring data-config: {err}"));
            Settings::default()
        }
    }
}

fn main() {
    let mount = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_ID));
    let settings = load_settings(mount.as_ref());
    clog(&format!("settings: {settings:?}"));
    let props = AppProps { settings };
    match mount {
        Some(root) => yew::Renderer::<App>::with_root_and_props(root, props).render(),
        None => yew::Renderer::<App>::with_props(props).render(),
    };
}
