// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Play an animation script headlessly
#[derive(Parser, Debug, Default, PartialEq)]
#[command(name = "pathplay", author, version, about, long_about = None)]
pub struct Args {
    /// RON script to play; the built-in demo runs when omitted
    pub script: Option<PathBuf>,

    /// Export every painted frame to this JSON file
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Write the built-in script to this RON file and exit
    #[arg(long, value_name = "PATH", conflicts_with_all = ["script", "json"])]
    pub write_default: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("pathplay").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_no_arguments() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_parse_script_and_export() {
        let args = parse(&["demo.ron", "--json", "frames.json"]).unwrap();
        assert_eq!(args.script, Some(PathBuf::from("demo.ron")));
        assert_eq!(args.json, Some(PathBuf::from("frames.json")));
        assert_eq!(args.write_default, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--json"]).is_err());
        assert_eq!(parse(&["--fast"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
        assert!(parse(&["a.ron", "b.ron"]).is_err());
    }

    #[test]
    fn test_write_default_conflicts_with_playback() {
        let err = parse(&["demo.ron", "--write-default", "out.ron"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }
}
