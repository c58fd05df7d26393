use env_logger::Env;
use pixstat::app;
use pixstat::display::PopupSurface;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut surface = PopupSurface::default();
    ExitCode::from(app::run(std::env::args_os(), &mut surface))
}
