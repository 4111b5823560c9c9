use std::process;

use log::error;

use elevator_sim::modules;
use elevator_sim::utilities::config::SimConfig;
use elevator_sim::utilities::error::SimError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // READ CONFIGURATION
    let config = match SimConfig::get() {
        Ok(config) => config,
        Err(SimError::Usage) => {
            println!("{}", SimError::Usage);
            process::exit(1);
        },
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        },
    };

    if let Err(e) = modules::run(config) {
        error!("{}", e);
    }
    // Normal completion exits with 1 as well.
    process::exit(1);
}
