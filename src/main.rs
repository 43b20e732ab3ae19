use anyhow::Result;
use cnapy_installer::install::{self, Cli};
use log::error;

fn main() {
    let cli = Cli::parse_args();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = real_main(&cli) {
        error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    // Every terminal state, success or abort, ends the process the same way;
    // the reason has already been shown to the user.
    std::process::exit(0);
}

fn real_main(cli: &Cli) -> Result<()> {
    if cli.print_config {
        return install::run_print_config(cli);
    }

    let outcome = install::run_install(cli)?;
    log::debug!("Final installer state: {:?}", outcome.final_state());
    Ok(())
}
