//! Program-name handling and argument passthrough.

use std::ffi::OsString;
use std::iter;
use std::path::Path;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};
use rsyncy_monitor::RenderMode;

/// Binary name suffix that selects the status-only mode.
pub const STATUS_ONLY_SUFFIX: &str = "rsyncy-stat";

const PROGRAM_NAME: &str = "rsyncy";
const RSYNC_ARGS: &str = "rsync-args";
const ESCAPE: &str = "--";

/// A parsed command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    /// Render mode chosen by the program name.
    pub mode: RenderMode,
    /// Arguments forwarded to rsync, in their original order.
    pub rsync_args: Vec<OsString>,
}

/// Picks the render mode from the name the program was invoked as.
pub fn mode_for_program(program: Option<&OsString>) -> RenderMode {
    let status_only = program
        .map(Path::new)
        .and_then(Path::file_name)
        .is_some_and(|name| name.to_string_lossy().ends_with(STATUS_ONLY_SUFFIX));
    if status_only {
        RenderMode::StatusOnly
    } else {
        RenderMode::Interactive
    }
}

/// Builds the `clap` command. Every argument belongs to rsync.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true)
        .arg(
            Arg::new(RSYNC_ARGS)
                .action(ArgAction::Append)
                .num_args(0..)
                .allow_hyphen_values(true)
                .trailing_var_arg(true)
                .value_parser(OsStringValueParser::new()),
        )
}

/// Parses `arguments`, where the first item is the program name.
pub fn parse_args<I, S>(arguments: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args = arguments.into_iter().map(Into::into);
    let program: Option<OsString> = args.next();
    let mode = mode_for_program(program.as_ref());

    // A leading escape ends clap's own option parsing, so every user argument
    // arrives verbatim, a literal `--` included.
    let argv = program
        .into_iter()
        .chain(iter::once(OsString::from(ESCAPE)))
        .chain(args);
    let mut matches = clap_command().try_get_matches_from(argv)?;
    let rsync_args: Vec<OsString> = matches
        .remove_many::<OsString>(RSYNC_ARGS)
        .map(Iterator::collect)
        .unwrap_or_default();

    Ok(Invocation { mode, rsync_args })
}
