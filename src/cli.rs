use std::path::PathBuf;

use clap::Parser;

/// phindex - PHP symbol indexer for editor autocomplete
#[derive(Parser, Debug)]
#[command(name = "phindex", version, about)]
pub struct Cli {
    /// Directory to scan recursively for PHP files
    pub root: PathBuf,

    /// Write the settings JSON to this file instead of stdout
    pub output: Option<PathBuf>,

    /// Suppress per-file progress output
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_only() {
        let cli = Cli::parse_from(["phindex", "/srv/php"]);
        assert_eq!(cli.root, PathBuf::from("/srv/php"));
        assert!(cli.output.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn root_and_output() {
        let cli = Cli::parse_from(["phindex", "/srv/php", "out.json"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn quiet_flag() {
        let cli = Cli::parse_from(["phindex", "--quiet", "/srv/php"]);
        assert!(cli.quiet);
    }

    #[test]
    fn missing_root_is_an_error() {
        assert!(Cli::try_parse_from(["phindex"]).is_err());
    }
}
