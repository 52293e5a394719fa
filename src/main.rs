mod app;
mod character;
mod config;
mod error;
mod render;
mod stage;
mod surface;
mod timer;

fn main() {
    env_logger::init();
    log::info!("Walk demo starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
