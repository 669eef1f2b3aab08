use clap::CommandFactory;

use crate::args::{CliArgs, CompletionsArgs};

pub fn completions_cmd(args: CompletionsArgs) {
    let mut command = CliArgs::command();
    let name = command.get_name().to_string();
    clap_complete::generate(args.shell, &mut command, name, &mut std::io::stdout());
}
