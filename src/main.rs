use std::process::ExitCode;

use activitydb::config::Config;
use activitydb::console::StdConsole;
use activitydb::db;
use activitydb::error::Result;
use activitydb::session;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DATE_FORMAT: &str = "%d/%m/%Y";

fn main() -> ExitCode
{
    match run()
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config : &Config)
{
    let filter = config.env_filter().unwrap_or_else(|reason| {
        eprintln!("Ignoring log filter {:?} ({}), using \"{}\"",
                  config.log_filter, reason, Config::FALLBACK_LOG);
        EnvFilter::new(Config::FALLBACK_LOG)
    });

    // stdout belongs to the menu, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()>
{
    let config = Config::from_env()?;
    init_logging(&config);

    let engine = db::load_driver()?;
    let conn = db::connect(&config.url, &config.user, &config.password)?;

    println!();
    println!("Activity database");
    println!("Version : {}", VERSION);
    println!("Engine  : sqlite {}", engine);
    println!("Database used: {}", config.url);
    println!("Session : {}", chrono::Local::now().format(DATE_FORMAT));

    // closes the connection on every way out
    session::run(conn, &config, &mut StdConsole::stdio())
}
