use std::process::ExitCode;

use hpxml_cli::{command, init_tracing, log_settings, run};

fn main() -> ExitCode {
    let matches = command().get_matches();
    let (verbose, format) = log_settings(&matches);
    init_tracing(verbose, format);

    match run(&matches) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
