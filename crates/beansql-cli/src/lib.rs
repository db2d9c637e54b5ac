mod build;
mod cli;
mod config;
mod fields;
mod output;
mod records;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Build(args) => build::run(args),
        cli::Command::Fields(args) => fields::run(args),
        cli::Command::Records(args) => records::run(args),
    }
}
