//! The `docs` command family over the embedded codex.

use crate::core::assets;
use crate::core::error::NirmanakayaError;
use clap::Subcommand;

#[derive(clap::Args, Debug)]
pub struct DocsCli {
    #[clap(subcommand)]
    pub command: DocsCommand,
}

#[derive(Subcommand, Debug)]
pub enum DocsCommand {
    /// List the embedded codex documents.
    List,
    /// Print one codex document as markdown.
    Show {
        #[clap(value_parser)]
        path: String,
    },
}

pub fn run_docs_cli(cli: DocsCli) -> Result<(), NirmanakayaError> {
    match cli.command {
        DocsCommand::List => {
            println!("Embedded codex documents:");
            for doc in assets::list_docs() {
                println!("- {}", doc);
            }
            Ok(())
        }
        DocsCommand::Show { path } => match assets::get_doc(&path) {
            Some(content) => {
                println!("{}", content);
                Ok(())
            }
            None => Err(NirmanakayaError::NotFound(format!("document '{}'", path))),
        },
    }
}
