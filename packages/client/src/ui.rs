//! UI utilities for the client.

use std::io::Write;

/// Redisplay the prompt after printing asynchronous output
pub fn redisplay_prompt(username: &str) {
    print!("{}> ", username);
    std::io::stdout().flush().ok();
}

/// Print a block of output and restore the prompt
pub fn print_with_prompt(output: &str, username: &str) {
    print!("{}", output);
    redisplay_prompt(username);
}
