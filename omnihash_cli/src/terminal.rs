//! Terminal detection utilities

use is_terminal::IsTerminal;
use std::io::stdin;

/// Check if stdin is connected to an interactive terminal.
///
/// With no inputs on the command line, a non-interactive stdin means piped
/// data to hash; an interactive one means the user wants help.
pub fn stdin_is_interactive() -> bool {
    stdin().is_terminal()
}
