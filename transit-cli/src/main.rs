use crate::commands::config::ConfigCommand;
use crate::commands::file::FileCommand;
use crate::commands::legs::LegsCommand;
use crate::commands::parse::ParseCommand;
use crate::commands::CommandRegistry;

mod commands;
mod logger;
mod output;

#[tokio::main]
async fn main() {
    let mut registry = CommandRegistry::new();
    registry.register(ParseCommand);
    registry.register(LegsCommand);
    registry.register(FileCommand);
    registry.register(ConfigCommand);

    let app = commands::build_app(&registry);
    let matches = app.get_matches();

    if matches.get_flag("debug") {
        logger::enable_debug();
    }
    logger::init_logger_with_log_bridge(logger::console_logger());

    if let Some((name, sub_matches)) = matches.subcommand() {
        if let Err(err) = registry.execute(name, sub_matches).await {
            crate::error!("{:#}", err);
            std::process::exit(1);
        }
    } else {
        crate::error!("No command found");
        std::process::exit(2);
    }
}
