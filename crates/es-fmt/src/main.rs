use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use es_fmt::{indent_file, reflow_file, DEFAULT_WIDTH};

#[derive(Debug, Parser)]
#[command(name = "easyscript-fmt")]
#[command(about = "Reformat EasyScript source files in place")]
struct Cli {
    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Wrap lines longer than the column budget.
    Reflow(ReflowArgs),
    /// Re-indent function blocks.
    Indent(IndentArgs),
}

#[derive(Debug, Args)]
struct ReflowArgs {
    file: PathBuf,
    #[arg(long = "width", default_value_t = DEFAULT_WIDTH)]
    width: usize,
}

#[derive(Debug, Args)]
struct IndentArgs {
    file: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let result = match &cli.command {
        Mode::Reflow(args) => reflow_file(&args.file, args.width)
            .map(|()| format!("Formatted file '{}' successfully.", args.file.display())),
        Mode::Indent(args) => {
            indent_file(&args.file).map(|()| format!("Prettified: {}", args.file.display()))
        }
    };

    match result {
        Ok(message) => println!("{}", message),
        Err(error) => {
            println!("{}", error);
            std::process::exit(1);
        }
    }
}
