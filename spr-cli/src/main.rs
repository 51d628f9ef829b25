use clap::Parser;

mod args;
mod cmd;
mod exit_codes;
mod logging;
mod output;

pub use args::*;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.output.verbose, cli.output.format);

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(cmd::run::run_cmd(cli));
    std::process::exit(exit_code);
}
