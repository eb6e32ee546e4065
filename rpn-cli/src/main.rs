//! RPN CLI - terminal front end for the rpn-core console calculator
//!
//! The same REPL that runs on a microcontroller UART runs here against the
//! terminal. Unlike the device build, the session ends at end of input.

mod logging;
mod stdio_port;

use clap::Parser;
use rpn_core::{PROMPT, Repl, ReplConfig};
use stdio_port::StdioPort;

#[derive(Parser, Debug)]
#[command(
    name = "rpn",
    about = "Reverse Polish Notation calculator console",
    version
)]
struct Cli {
    /// Prompt shown before each line
    #[arg(long, default_value = PROMPT)]
    prompt: String,

    /// Do not send a line feed after each entered line
    #[arg(long)]
    no_line_feed: bool,

    /// After an error, read the rest of the line as a new line instead of dropping it
    #[arg(long)]
    keep_rest_of_line: bool,

    /// Echo input back to the output, as a serial console would
    #[arg(long)]
    echo: bool,

    /// Do not print the banner
    #[arg(short, long)]
    quiet: bool,

    /// Log level (-v=info, -vv=debug, -vvv=trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn repl_config(&self) -> ReplConfig<'_> {
        ReplConfig {
            prompt: &self.prompt,
            line_feed_on_enter: !self.no_line_feed,
            discard_rest_of_line: !self.keep_rest_of_line,
        }
    }
}

fn print_banner() {
    println!();
    println!("RPN console v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Enter postfix expressions, e.g. `3 4 +` or `10 2 /`");
    println!("Operators: + - * / %  (integers only)");
    println!("Press Ctrl-D to exit");
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut port = StdioPort::new(cli.echo);
    let interactive = port.is_interactive();
    if interactive && !cli.quiet {
        print_banner();
    }
    tracing::info!(interactive, "session started");

    let mut repl = Repl::new(cli.repl_config());
    repl.run_until(&mut port, StdioPort::at_end);

    if interactive {
        println!("\nGoodbye!");
    }
    tracing::info!("session ended");
    Ok(())
}
