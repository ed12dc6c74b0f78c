//! Startup banner for interactive mode.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

/// Prints the npcflip banner and key help to stdout.
///
/// Colored when stdout is a terminal, plain otherwise.
pub fn print_banner() {
    let title = r"
                       __  _____ _ _
   _ __  _ __   ___   / _||  ___| (_)_ __
  | '_ \| '_ \ / __| | |_ | |_  | | | '_ \
  | | | | |_) | (__  |  _||  _| | | | |_) |
  |_| |_| .__/ \___| |_|  |_|   |_|_| .__/
        |_|                         |_|";
    let keys = "t toggle  i instant  o order  r refresh  q quit";

    if std::io::stdout().is_terminal() {
        println!("{}", title.yellow().bold());
        println!("  {}\n", keys.dimmed());
    } else {
        println!("{title}");
        println!("  {keys}\n");
    }
}
