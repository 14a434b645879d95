use anonymous_cli::commands::execute;
use anonymous_cli::config::{CliCommand, Config, GlobalOptions};
use clap::Parser;

fn main() {
    env_logger::init();
    let config: Config = Config::parse();
    let (global_options, command) = config.to_parts();

    match run(command, global_options) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("** Error ** \n {err}");
            std::process::exit(1);
        }
    }
}

fn run(command: CliCommand, options: GlobalOptions) -> Result<String, anyhow::Error> {
    let output = execute(command, &options)?;
    let rendered = output.render(options.output)?;
    Ok(rendered)
}
