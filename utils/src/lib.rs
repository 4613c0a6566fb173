use std::{fmt, io::BufRead, str::FromStr};

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

/// LogLevel
///
/// Represents minimum level of messages that will be logged
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel {
    pub level: usize,
}

impl FromStr for LogLevel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel { level: 0 }),
            "warn" => Ok(LogLevel { level: 1 }),
            "info" => Ok(LogLevel { level: 2 }),
            "debug" => Ok(LogLevel { level: 3 }),
            "trace" => Ok(LogLevel { level: 4 }),
            "none" => Ok(LogLevel { level: 5 }),
            _ => Err("no match"),
        }
    }
}

impl LogLevel {
    pub fn is_none(&self) -> bool {
        self.level > 4
    }
    pub fn get_level(&self) -> usize {
        if self.level > 4 {
            0
        } else {
            self.level
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let level_str = ["error", "warn", "info", "debug", "trace", "none"];
        if self.level < 6 {
            write!(f, "{}", level_str[self.level])
        } else {
            write!(f, "unknown")
        }
    }
}

/// Add the logging options shared by all of the tools (timestamp, loglevel, quiet)
pub fn add_log_options(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("timestamp")
            .short('X')
            .long("timestamp")
            .value_parser(value_parser!(stderrlog::Timestamp))
            .value_name("GRANULARITY")
            .default_value("none")
            .help("Prepend log entries with a timestamp"),
    )
    .arg(
        Arg::new("loglevel")
            .short('l')
            .long("loglevel")
            .value_name("LOGLEVEL")
            .value_parser(value_parser!(LogLevel))
            .ignore_case(true)
            .default_value("warn")
            .help("Set log level"),
    )
    .arg(
        Arg::new("quiet")
            .action(ArgAction::SetTrue)
            .long("quiet")
            .conflicts_with("loglevel")
            .help("Silence all output"),
    )
}

/// Initialize logging from command line arguments
pub fn init_log(m: &ArgMatches) -> anyhow::Result<()> {
    let verbose = m
        .get_one::<LogLevel>("loglevel")
        .copied()
        .unwrap_or(LogLevel { level: 2 });
    let quiet = verbose.is_none() || m.get_flag("quiet");
    let ts = m
        .get_one::<stderrlog::Timestamp>("timestamp")
        .copied()
        .unwrap_or(stderrlog::Timestamp::Off);

    stderrlog::new()
        .quiet(quiet)
        .verbosity(verbose.get_level())
        .timestamp(ts)
        .init()
        .with_context(|| "Could not initialize logging")
}

/// Read in next line and split on tabs after trimming white space
pub fn get_next_line<'a, R: BufRead>(
    rdr: &mut R,
    buf: &'a mut String,
) -> std::io::Result<Option<Vec<&'a str>>> {
    buf.clear();
    if rdr.read_line(buf)? == 0 {
        Ok(None)
    } else {
        Ok(Some(buf.trim().split('\t').collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("error", 0)]
    #[case("WARN", 1)]
    #[case("Info", 2)]
    #[case("debug", 3)]
    #[case("trace", 4)]
    #[case("none", 5)]
    fn parse_log_level(#[case] s: &str, #[case] level: usize) {
        assert_eq!(LogLevel::from_str(s), Ok(LogLevel { level }));
    }

    #[test]
    fn log_level_none_is_quiet() {
        let l = LogLevel::from_str("none").unwrap();
        assert!(l.is_none());
        assert_eq!(l.get_level(), 0);
        assert_eq!(l.to_string(), "none");
        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn split_lines_on_tabs() {
        let mut rdr = "NC_000962.3\t10\t5\n\nchr\t1  \n".as_bytes();
        let mut buf = String::new();

        let f = get_next_line(&mut rdr, &mut buf).unwrap().unwrap();
        assert_eq!(f, vec!["NC_000962.3", "10", "5"]);

        let f = get_next_line(&mut rdr, &mut buf).unwrap().unwrap();
        assert_eq!(f, vec![""]);

        let f = get_next_line(&mut rdr, &mut buf).unwrap().unwrap();
        assert_eq!(f, vec!["chr", "1"]);

        assert!(get_next_line(&mut rdr, &mut buf).unwrap().is_none());
    }

    #[test]
    fn log_options_parse() {
        let m = add_log_options(Command::new("test"))
            .try_get_matches_from(["test", "-l", "DEBUG"])
            .unwrap();
        assert_eq!(
            m.get_one::<LogLevel>("loglevel").copied(),
            Some(LogLevel { level: 3 })
        );
        assert!(!m.get_flag("quiet"));
    }
}
