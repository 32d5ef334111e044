use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use log::info;

use todo_board_terminal_ui::api::HttpTaskService;
use todo_board_terminal_ui::app::{self, App};
use todo_board_terminal_ui::config::Config;

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_logging(&config.log_file)?;
    info!("using todo service at {}", config.api_url);

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let service = HttpTaskService::new(config.api_url);
    app::run(App::new(service))
}
