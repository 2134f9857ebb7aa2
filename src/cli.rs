//! Command-line interface for svg2cairoxml.

use clap::crate_version;

use std::ffi::OsString;
use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "svg2cairoxml";

/// What the command line asks the program to do.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Not enough file arguments were given.
    Usage,

    /// `--version` was given.
    Version,

    /// Convert `input` into `output`.
    Convert {
        input: PathBuf,
        output: PathBuf,

        /// Number of positional arguments after the output path, which are ignored.
        ignored: usize,
    },
}

pub fn build_cli() -> clap::Command {
    clap::Command::new(PROGRAM_NAME)
        .version(concat!("version ", crate_version!()))
        .about("Convert an SVG file into a cairo XML drawing trace")
        .disable_version_flag(true)
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('?')
                .long("help")
                .help("Display the help")
                .action(clap::ArgAction::Help),
        )
        .arg(
            clap::Arg::new("version")
                .short('v')
                .long("version")
                .help("Display the version information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("FILE")
                .help("The SVG file to read, followed by the XML file to write")
                .value_parser(clap::value_parser!(OsString))
                .num_args(0..)
                .allow_hyphen_values(true)
                .action(clap::ArgAction::Append),
        )
}

/// Parses the process arguments.
pub fn parse_args() -> Result<Action, clap::Error> {
    parse_args_from(std::env::args_os())
}

/// Parses `args`, whose first item is the program name.
pub fn parse_args_from<I, T>(args: I) -> Result<Action, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_cli().try_get_matches_from(args)?;

    if matches.get_flag("version") {
        return Ok(Action::Version);
    }

    let mut files = matches
        .get_many::<OsString>("FILE")
        .into_iter()
        .flatten()
        .map(PathBuf::from);

    match (files.next(), files.next()) {
        (Some(input), Some(output)) => Ok(Action::Convert {
            input,
            output,
            ignored: files.count(),
        }),

        _ => Ok(Action::Usage),
    }
}

pub fn usage() -> String {
    format!("usage: {PROGRAM_NAME} svg-file xml-file")
}

pub fn print_version() {
    println!("{PROGRAM_NAME} version {}\n", crate_version!());
    println!("libraries used:");
    println!("  cairo {}", cairo::version_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_files_is_usage() {
        assert_eq!(parse_args_from([PROGRAM_NAME]).unwrap(), Action::Usage);
    }

    #[test]
    fn one_file_is_usage() {
        assert_eq!(
            parse_args_from([PROGRAM_NAME, "in.svg"]).unwrap(),
            Action::Usage
        );
    }

    #[test]
    fn two_files_convert() {
        assert_eq!(
            parse_args_from([PROGRAM_NAME, "in.svg", "out.xml"]).unwrap(),
            Action::Convert {
                input: PathBuf::from("in.svg"),
                output: PathBuf::from("out.xml"),
                ignored: 0,
            }
        );
    }

    #[test]
    fn extra_files_are_counted() {
        assert_eq!(
            parse_args_from([PROGRAM_NAME, "a.svg", "b.xml", "c", "d"]).unwrap(),
            Action::Convert {
                input: PathBuf::from("a.svg"),
                output: PathBuf::from("b.xml"),
                ignored: 2,
            }
        );
    }

    #[test]
    fn unknown_option_is_a_file() {
        assert_eq!(parse_args_from([PROGRAM_NAME, "-x"]).unwrap(), Action::Usage);
        assert_eq!(
            parse_args_from([PROGRAM_NAME, "--frobnicate"]).unwrap(),
            Action::Usage
        );
    }

    #[test]
    fn files_may_start_with_a_hyphen() {
        assert_eq!(
            parse_args_from([PROGRAM_NAME, "-drawing.svg", "-out.xml"]).unwrap(),
            Action::Convert {
                input: PathBuf::from("-drawing.svg"),
                output: PathBuf::from("-out.xml"),
                ignored: 0,
            }
        );
    }

    #[test]
    fn version_flag() {
        assert_eq!(
            parse_args_from([PROGRAM_NAME, "--version"]).unwrap(),
            Action::Version
        );
        assert_eq!(
            parse_args_from([PROGRAM_NAME, "-v", "in.svg", "out.xml"]).unwrap(),
            Action::Version
        );
    }

    #[test]
    fn help_flag_is_reported_by_clap() {
        let e = parse_args_from([PROGRAM_NAME, "-?"]).unwrap_err();
        assert_eq!(e.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn usage_names_the_program() {
        assert_eq!(usage(), "usage: svg2cairoxml svg-file xml-file");
    }

    #[test]
    fn cli_is_consistent() {
        build_cli().debug_assert();
    }
}
