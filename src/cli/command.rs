use std::path::PathBuf;

use crate::query::{ExportCriteria, FilterCriteria};

/// Programmatic form of the CLI subcommands that read the record store.
#[derive(Debug, Clone)]
pub enum Command {
    Query {
        criteria: FilterCriteria,
    },
    Export {
        criteria: ExportCriteria,
        file: PathBuf,
    },
    Options,
    Summary {
        criteria: FilterCriteria,
    },
}
