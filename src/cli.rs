use std::path::PathBuf;

use crate::app::LogLevel;
use crate::{Error, Result};

/// Options for the `run` command; values are `None` when not provided on CLI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub core_props: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
}

/// Parsed command-line intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    ShowHelp,
    ShowVersion,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut iter = args.iter();
        match iter.next().map(|s| s.as_str()) {
            None => Ok(Command::Run(RunOptions::default())),
            Some("run") => Ok(Command::Run(parse_run_options(&mut iter)?)),
            Some("--help") | Some("-h") => Ok(Command::ShowHelp),
            Some("--version") | Some("-V") => Ok(Command::ShowVersion),
            // `run` may be omitted when the first argument is already a flag.
            Some(flag) if flag.starts_with('-') => {
                let mut iter = args.iter();
                Ok(Command::Run(parse_run_options(&mut iter)?))
            }
            Some(cmd) => Err(Error::InvalidArgs(format!(
                "unknown command '{cmd}', try --help"
            ))),
        }
    }

    pub fn help() -> &'static str {
        concat!(
            "oledtherm - CPU/GPU temperatures on a SteelSeries keyboard OLED\n",
            "\n",
            "USAGE:\n",
            "  oledtherm [run] [--config <path>] [--core-props <path>] [--log-level <level>] [--log-file <path>]\n",
            "  oledtherm --help\n",
            "  oledtherm --version\n",
            "\n",
            "OPTIONS:\n",
            "  --config <path>      Settings file (default: ~/.oledtherm/config.toml)\n",
            "  --core-props <path>  SteelSeries GG coreProps.json, overrides the settings file\n",
            "  --log-level <level>  error, warn, info, debug or trace (default: info)\n",
            "  --log-file <path>    Append log lines here (default: ~/.oledtherm/oledtherm.log)\n",
            "  -h, --help           Show this help\n",
            "  -V, --version        Show version\n",
        )
    }

    pub fn print_help() {
        println!("{}", Self::help());
    }
}

fn parse_run_options(iter: &mut std::slice::Iter<String>) -> Result<RunOptions> {
    let mut opts = RunOptions::default();

    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--config" => {
                opts.config = Some(PathBuf::from(take_value(flag, iter)?));
            }
            "--core-props" => {
                opts.core_props = Some(PathBuf::from(take_value(flag, iter)?));
            }
            "--log-level" => {
                let raw = take_value(flag, iter)?;
                opts.log_level = Some(raw.parse().map_err(|_| {
                    Error::InvalidArgs(format!(
                        "log level must be one of error, warn, info, debug, trace (got '{raw}')"
                    ))
                })?);
            }
            "--log-file" => {
                opts.log_file = Some(PathBuf::from(take_value(flag, iter)?));
            }
            other => {
                return Err(Error::InvalidArgs(format!(
                    "unknown flag '{other}', try --help"
                )));
            }
        }
    }

    Ok(opts)
}

fn take_value(flag: &str, iter: &mut std::slice::Iter<String>) -> Result<String> {
    iter.next()
        .cloned()
        .ok_or_else(|| Error::InvalidArgs(format!("expected a value after {flag}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_defaults_with_no_args() {
        let cmd = Command::parse(&[]).unwrap();
        assert_eq!(cmd, Command::Run(RunOptions::default()));
    }

    #[test]
    fn parse_run_with_overrides() {
        let cmd = Command::parse(&args(&[
            "run",
            "--config",
            "/tmp/oledtherm.toml",
            "--core-props",
            "/tmp/coreProps.json",
            "--log-level",
            "DEBUG",
            "--log-file",
            "/tmp/oledtherm.log",
        ]))
        .unwrap();
        let expected = RunOptions {
            config: Some("/tmp/oledtherm.toml".into()),
            core_props: Some("/tmp/coreProps.json".into()),
            log_level: Some(LogLevel::Debug),
            log_file: Some("/tmp/oledtherm.log".into()),
        };
        assert_eq!(cmd, Command::Run(expected));
    }

    #[test]
    fn parse_run_allows_implicit_subcommand() {
        let cmd = Command::parse(&args(&["--core-props", "/tmp/coreProps.json"])).unwrap();
        let expected = RunOptions {
            core_props: Some("/tmp/coreProps.json".into()),
            ..RunOptions::default()
        };
        assert_eq!(cmd, Command::Run(expected));
    }

    #[test]
    fn parse_help_and_version() {
        assert_eq!(Command::parse(&args(&["-h"])).unwrap(), Command::ShowHelp);
        assert_eq!(
            Command::parse(&args(&["--version"])).unwrap(),
            Command::ShowVersion
        );
    }

    #[test]
    fn parse_rejects_unknown_flag_and_command() {
        let err = Command::parse(&args(&["--nope"])).unwrap_err();
        assert!(format!("{err}").contains("unknown flag"));
        let err = Command::parse(&args(&["serve"])).unwrap_err();
        assert!(format!("{err}").contains("unknown command"));
    }

    #[test]
    fn parse_rejects_missing_value_and_bad_level() {
        let err = Command::parse(&args(&["--config"])).unwrap_err();
        assert!(format!("{err}").contains("expected a value after --config"));
        let err = Command::parse(&args(&["--log-level", "loud"])).unwrap_err();
        assert!(format!("{err}").contains("log level"));
    }
}
