//! Command-line argument parsing for the storebot CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

/// Options for a chat run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Base URL override (`--url`); falls back to the `STOREBOT_BASE_URL`
    /// environment variable, then the built-in default
    pub base_url: Option<String>,
    /// Use the server-push (SSE) binding instead of the chunked POST body
    pub push: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Run the chat loop (default)
    Run(RunOptions),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use storebot::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["storebot".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    let mut args = args.skip(1); // Skip the program name

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--push" | "--sse" => options.push = true,
            "--url" => options.base_url = args.next(),
            _ => {}
        }
    }
    CliCommand::Run(options)
}
