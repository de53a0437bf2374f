// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{error::Error, io};

use clap::{ArgMatches, Command, ValueEnum, arg, value_parser};
use clap_complete::generate;
use clap_complete_nushell::Nushell;

use crate::Cli;

/// Emits a completion script for the requested shell on stdout.
#[derive(Debug, Clone, Copy)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Generate a completion script for the given shell")
            .hide(true)
            .arg(
                arg!(shell: <SHELL> "The shell to generate a completion script for")
                    .value_parser(value_parser!(Shell)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        match matches.get_one::<Shell>("shell") {
            Some(shell) => Self { shell: *shell },
            _ => unreachable!(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating shell completion...");
        self.write_to(&mut io::stdout());
        Ok(())
    }

    fn write_to(self, buf: &mut impl io::Write) {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        match self.shell.native() {
            Some(shell) => generate(shell, &mut cmd, name, buf),
            None => generate(Nushell, &mut cmd, name, buf),
        }
    }
}

/// The shells a completion script can be generated for.
///
/// Nushell is not covered by clap_complete and goes through the
/// clap_complete_nushell generator instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[clap(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}

impl Shell {
    /// The clap_complete generator for this shell, if it has one.
    fn native(self) -> Option<clap_complete::Shell> {
        match self {
            Shell::Bash => Some(clap_complete::Shell::Bash),
            Shell::Elvish => Some(clap_complete::Shell::Elvish),
            Shell::Fish => Some(clap_complete::Shell::Fish),
            Shell::PowerShell => Some(clap_complete::Shell::PowerShell),
            Shell::Zsh => Some(clap_complete::Shell::Zsh),
            Shell::Nushell => None,
        }
    }
}
