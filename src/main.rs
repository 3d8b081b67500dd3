use std::env;
use std::process;

use winux::flags::Flags;
use winux::shell::Shell;

fn main() -> Result<(), winux::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("Winux {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let line = flags.get_value("execute").map(str::to_string);
    let mut shell = Shell::new(flags)?;
    match line {
        Some(line) => {
            if shell.run_once(&line)? {
                process::exit(1);
            }
            Ok(())
        }
        None => shell.run(),
    }
}
