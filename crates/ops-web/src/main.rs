mod actions;
mod api;
mod app;
mod browser;
mod components;
mod config;
mod logging;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();

    // pages without the dashboard mount point are left untouched
    let Some(root) = browser::find_element(config::CONFIG.mount_selector) else {
        return;
    };
    leptos::mount::mount_to(root, app::App).forget();
}
