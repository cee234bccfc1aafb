use campuslens::{App, DashboardConfig};
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);

    let config = match DashboardConfig::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}; falling back to defaults", e);
            DashboardConfig::default()
        }
    };
    log::info!("Starting CampusLens (api base '{}')", config.api_base);

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
