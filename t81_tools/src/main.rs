//! A single-shot command-line front end to `t81_core`: evaluates one
//! expression argument and prints the ternary-text result, or writes an
//! error to stderr and exits non-zero. No prompt, no loop, no line editor —
//! this stays a library demonstration, not a terminal UI.

use std::process::ExitCode;

use t81_core::{Config, Kernel, Radix};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let expression = match args.as_slice() {
        [single] => single,
        _ => {
            eprintln!("usage: t81_tools <expression>");
            eprintln!(r#"example: t81_tools "(12 + 1) * 2""#);
            return ExitCode::FAILURE;
        }
    };

    let kernel = Kernel::new(Config::default());
    match kernel.eval(expression) {
        Ok(value) => {
            println!("{}", t81_core::to_text(&value, Radix::BalancedTernary));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("t81_tools: {err}");
            ExitCode::FAILURE
        }
    }
}
