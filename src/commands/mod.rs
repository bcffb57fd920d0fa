use clap::Args;

use crate::config;
use crate::Settings;

pub mod repl;
pub mod run;

/// Interpretation flags shared by `run` and `repl`. Unset flags fall back
/// to the config file, then to built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct ModeArgs {
    /// Wrap the pointer around the tape and cells within 0..=255
    #[arg(short = 'c', long = "classic", conflicts_with = "strict")]
    pub classic: bool,

    /// Fail on pointer or cell overflow (the default)
    #[arg(short = 's', long = "strict")]
    pub strict: bool,

    /// ',' reads a 1 or 2-digit number instead of a character
    #[arg(long = "numin")]
    pub numeric_input: bool,

    /// '.' prints the cell as a number instead of a character
    #[arg(long = "numout")]
    pub numeric_output: bool,

    /// Number of tape cells (at least 1)
    #[arg(short = 'm', long = "memory", value_name = "CELLS")]
    pub memory: Option<usize>,
}

impl ModeArgs {
    /// Merge these flags over `base`.
    pub fn apply(&self, base: Settings) -> Settings {
        let mut settings = base;
        if self.classic {
            settings = settings.classic(true);
        }
        if self.strict {
            settings = settings.classic(false);
        }
        if self.numeric_input {
            settings = settings.numeric_input(true);
        }
        if self.numeric_output {
            settings = settings.numeric_output(true);
        }
        if let Some(memory) = self.memory {
            settings = settings.tape_len(memory);
        }
        settings
    }

    /// Flags merged over the configured defaults.
    pub fn settings(&self) -> Settings {
        self.apply(*config::defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::OverflowPolicy;

    #[test]
    fn no_flags_keep_base() {
        let base = Settings::default().classic(true).tape_len(7);
        assert_eq!(ModeArgs::default().apply(base), base);
    }

    #[test]
    fn flags_override_base() {
        let args = ModeArgs {
            strict: true,
            numeric_output: true,
            memory: Some(3),
            ..ModeArgs::default()
        };
        let settings = args.apply(Settings::default().classic(true));
        assert_eq!(settings.policy, OverflowPolicy::Strict);
        assert!(settings.numeric_output);
        assert!(!settings.numeric_input);
        assert_eq!(settings.tape_len, 3);
    }
}
