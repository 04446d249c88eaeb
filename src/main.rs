//! Entry point: reads the mount element's attributes and renders the counter.

use counter_widget::components::{CounterApp, CounterAppProps};
use counter_widget::config::MOUNT_ID;
use counter_widget::utils::RawAttributes;
use gloo_utils::document;
use log::{info, warn, Level};

fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));

    match document().get_element_by_id(MOUNT_ID) {
        Some(root) => {
            let props = CounterAppProps::from(RawAttributes::from_element(&root));
            info!("Mounting counter on #{}", MOUNT_ID);
            yew::Renderer::<CounterApp>::with_root_and_props(root, props).render();
        }
        None => {
            warn!("No #{} element found, mounting on <body> with defaults", MOUNT_ID);
            yew::Renderer::<CounterApp>::new().render();
        }
    }
}
