use std::process;

use clap::Parser;
use userdb::cli::{execute_command, output, setup, Cli};
use userdb::exitcode;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // usage errors exit 1 like every other failure; --help/--version keep clap's 0
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(exitcode::FAILURE);
        }
        Err(e) => e.exit(),
    };

    let ctx = setup(&cli);

    if let Err(e) = execute_command(&cli, &ctx) {
        output::error(&e);
        process::exit(e.exit_code());
    }
    process::exit(exitcode::OK);
}
