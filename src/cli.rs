//! Command-line options for the `tetris-train` binary.

use anyhow::{anyhow, bail, Result};

use crate::types::GameConfig;

pub const USAGE: &str = "\
usage: tetris-train [--seed N] [--fall-ms N] [--headless TICKS]

  --seed N          RNG seed for the piece sequence (default 1)
  --fall-ms N       milliseconds between gravity steps (default 1000)
  --headless TICKS  simulate TICKS fixed 16ms steps without a terminal and
                    print one JSON snapshot per simulated second to stdout

Logging goes to stderr and is controlled by RUST_LOG.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub seed: u32,
    pub fall_ms: Option<u32>,
    pub headless_ticks: Option<u32>,
    pub help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            seed: 1,
            fall_ms: None,
            headless_ticks: None,
            help: false,
        }
    }
}

impl CliOptions {
    /// Game configuration with the command-line overrides applied.
    pub fn game_config(&self) -> GameConfig {
        let mut config = GameConfig::default();
        if let Some(ms) = self.fall_ms {
            config.fall_interval_ms = ms;
        }
        config
    }
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                opts.seed = parse_value(args.get(i), "--seed")?;
            }
            "--fall-ms" => {
                i += 1;
                let ms: u32 = parse_value(args.get(i), "--fall-ms")?;
                if ms == 0 {
                    bail!("--fall-ms must be greater than zero");
                }
                opts.fall_ms = Some(ms);
            }
            "--headless" => {
                i += 1;
                opts.headless_ticks = Some(parse_value(args.get(i), "--headless")?);
            }
            "-h" | "--help" => opts.help = true,
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(opts)
}

fn parse_value(value: Option<&String>, flag: &str) -> Result<u32> {
    let v = value.ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<u32>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let opts = parse_args(&[]).unwrap();
        assert_eq!(opts, CliOptions::default());
        assert_eq!(opts.game_config(), GameConfig::default());
    }

    #[test]
    fn parses_all_flags() {
        let opts = parse_args(&args(&["--seed", "42", "--fall-ms", "250", "--headless", "600"]))
            .unwrap();
        assert_eq!(opts.seed, 42);
        assert_eq!(opts.headless_ticks, Some(600));
        assert_eq!(opts.game_config().fall_interval_ms, 250);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["--fall-ms", "0"])).is_err());
        assert!(parse_args(&args(&["--turbo"])).is_err());
    }
}
