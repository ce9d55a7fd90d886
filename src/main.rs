mod app;
mod screens;
use app::App;
use attendance_app::config::load_config;
use attendance_app::logging::init_logging;

fn main() -> iced::Result {
    let config = load_config();
    init_logging(config.log_level.as_deref());
    tracing::info!(storage = %config.storage_path().display(), "starting attendance tracker");

    iced::application("Attendance", App::update, App::view)
        .theme(|app: &App| app.theme.clone())
        .window_size(iced::Size::new(1400.0, 800.0))
        .run_with(move || (App::new(config), iced::Task::none()))
}
