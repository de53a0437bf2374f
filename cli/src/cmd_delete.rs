// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::error::Error;

use calcli_core::{Calcli, Id, Kind};
use clap::{ArgMatches, Command};

use crate::util::{arg_ids, get_ids};

#[derive(Debug, Clone)]
pub struct CmdDelete {
    pub ids: Vec<Id>,
}

impl CmdDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Delete an event or todo, removing its file from the calendar")
            .arg(arg_ids())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
        }
    }

    pub async fn run(self, calcli: &mut Calcli) -> Result<(), Box<dyn Error>> {
        for id in &self.ids {
            tracing::debug!(%id, "deleting item...");
            let kind = calcli.delete(id).await?;
            let kind = match kind {
                Kind::Event => "event",
                Kind::Todo => "todo",
            };
            println!("Deleted {kind} {id}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delete() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdDelete::command());

        let matches = cmd
            .try_get_matches_from(["test", "delete", "3", "some-uid"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("delete").unwrap();
        let parsed = CmdDelete::from(sub_matches);
        assert_eq!(
            parsed.ids,
            vec![
                Id::ShortIdOrUid("3".to_string()),
                Id::ShortIdOrUid("some-uid".to_string())
            ]
        );
    }
}
