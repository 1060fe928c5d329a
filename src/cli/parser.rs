use crate::core::query::{SortField, SortOrder};
use crate::core::timeline::EventKind;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for hoflow
/// House Officers Clinical Flow: rotations, presentations and sign-outs
#[derive(Parser)]
#[command(
    name = "hoflow",
    version = env!("CARGO_PKG_VERSION"),
    about = "House Officers Clinical Flow: track rotations, clinical presentations and sign-out dates",
    long_about = None
)]
pub struct Cli {
    /// Override the local database path (useful for tests or a custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter / sort options shared by `list` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only this unit (e.g. "Nephrology", "Cardiology 1", "id-derm")
    #[arg(long)]
    pub unit: Option<String>,

    /// Only this gender (M / F)
    #[arg(long)]
    pub gender: Option<String>,

    /// Case-insensitive match on name or presentation topic
    #[arg(long, short = 's')]
    pub search: Option<String>,

    #[arg(long = "sort-by", value_enum, default_value_t = SortField::FullName)]
    pub sort_by: SortField,

    #[arg(long = "order", value_enum, default_value_t = SortOrder::Asc)]
    pub order: SortOrder,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the local database and configuration
    Init {
        /// Also create the shared SQLite file configured as remote
        #[arg(long = "remote")]
        remote: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register a new house officer
    Add {
        #[arg(long = "name", help = "Full name")]
        name: String,

        #[arg(long = "gender", help = "Gender: M=Male, F=Female")]
        gender: String,

        #[arg(long = "unit", help = "Unit assigned (e.g. Nephrology, \"Cardiology 1\")")]
        unit: String,

        #[arg(long = "signed-in", help = "Sign-in date (YYYY-MM-DD)")]
        signed_in: String,

        #[arg(long = "topic", help = "Clinical presentation topic")]
        topic: Option<String>,

        #[arg(long = "presentation", help = "Clinical presentation date (YYYY-MM-DD)")]
        presentation: Option<String>,
    },

    /// Update an officer; only the given fields change
    Edit {
        /// Officer id (see `list --ids`)
        id: String,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "gender")]
        gender: Option<String>,

        #[arg(long = "unit")]
        unit: Option<String>,

        /// New sign-in date; the sign-out date is always derived again
        #[arg(long = "signed-in")]
        signed_in: Option<String>,

        /// Explicit sign-out date (YYYY-MM-DD), only when the sign-in date is unchanged
        #[arg(long = "sign-out", conflicts_with = "signed_in")]
        sign_out: Option<String>,

        /// Presentation topic ("" clears it)
        #[arg(long = "topic")]
        topic: Option<String>,

        /// Presentation date ("" clears it)
        #[arg(long = "presentation")]
        presentation: Option<String>,
    },

    /// Delete an officer by id
    Del {
        id: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List officers with dashboard statistics
    List {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long = "ids", help = "Show the id column")]
        ids: bool,
    },

    /// Sign-out or presentation timeline, soonest first
    Timeline {
        #[arg(long = "kind", value_enum, default_value_t = EventKind::Signout)]
        kind: EventKind,
    },

    /// Staffing of the priority units (always over all officers)
    Priority,

    /// Google Calendar links
    Calendar {
        /// Officer id (omit with --all)
        id: Option<String>,

        #[arg(long = "kind", value_enum, default_value_t = EventKind::Signout)]
        kind: EventKind,

        #[arg(long = "all", conflicts_with = "id", help = "Links for every officer")]
        all: bool,
    },

    /// Export officers to PDF / CSV / JSON / XLSX
    Export {
        #[arg(long = "format", value_enum, default_value_t = ExportFormat::Pdf)]
        format: ExportFormat,

        /// Absolute output path (default: ./House_Officers_Clinical_Flow_<date>.<ext>)
        #[arg(long = "file")]
        file: Option<String>,

        /// Name printed as "Downloaded by" (required for PDF)
        #[arg(long = "signer")]
        signer: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Only these officer ids (comma separated)
        #[arg(long = "ids", value_delimiter = ',')]
        ids: Vec<String>,

        #[arg(long = "force", help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Upload the local cache to the remote store (replaces remote content)
    Sync {
        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
