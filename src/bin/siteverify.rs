use clap::Parser;
use clap::error::ErrorKind;
use siteverify::config::{CliConfig, Config};
use siteverify::listfile;
use siteverify::reporting::logging;
use siteverify::ui::{Cli, Reporter, USAGE, cli_to_config};
use siteverify::verify::{Cancellation, Verifier};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => std::process::exit(handle_parse_error(&err)),
    };

    match run_siteverify_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Print help/version as usual; every other parse failure prints the usage and exits 1
pub fn handle_parse_error(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        _ => {
            let _ = err.print();
            println!("{USAGE}");
            1
        }
    }
}

/// Main verification logic extracted from main() for testing
pub fn run_siteverify_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    let quiet = config.quiet.unwrap_or(false);
    logging::init_logger(config.verbose.unwrap_or(false), quiet);
    logging::log_config_info(&config);

    // Fatal input errors surface before any probe is issued
    let addresses = listfile::read_addresses(&cli.input).inspect_err(|e| {
        logging::log_error("Could not load addresses", Some(e));
    })?;
    logging::log_input_info(&cli.input, addresses.len());

    let verifier = Verifier::new(&config)?;
    let reporter = Reporter::new(
        addresses.len(),
        config.progress.unwrap_or(true) && !quiet,
        quiet,
    );

    let report = verifier.run(&addresses, &reporter, &Cancellation::new());
    reporter.finish(report.verified());
    logging::log_run_complete(&report);

    listfile::write_results(&cli.output, &report.results).inspect_err(|e| {
        logging::log_error("Could not write verified addresses", Some(e));
    })?;

    Ok(0)
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}
