use clap::Parser;
use std::io;
use todo::cli::{dispatch_and_close, Cli};
use todo::error::TodoError;
use todo::infrastructure::open_store;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<i32, TodoError> {
    let config = cli.store_config();
    let mut store = open_store(&config)?;

    dispatch_and_close(
        store.as_mut(),
        &cli.args,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}
