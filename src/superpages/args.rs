use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use superpages::model::ContentFormat;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.0" for releases, "0.3.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

fn parse_format(s: &str) -> Result<ContentFormat, String> {
    s.parse().map_err(|e: superpages::error::SuperpagesError| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "superpages", version = get_version())]
#[command(about = "Hierarchical flat pages with a snapshot of every save", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the OS data dir)
    #[arg(long, global = true, env = "SUPERPAGES_HOME")]
    pub data_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new page
    #[command(alias = "n")]
    Create {
        /// Title of the page
        title: String,

        /// Page body
        #[arg(short, long, default_value = "")]
        content: String,

        /// Content format: txt, rst or html (defaults to config)
        #[arg(short, long, value_parser = parse_format)]
        format: Option<ContentFormat>,

        /// Path of the parent page
        #[arg(short, long)]
        parent: Option<String>,

        /// Explicit slug (derived from the title otherwise)
        #[arg(long)]
        slug: Option<String>,

        /// Explicit path (derived from parent and slug otherwise)
        #[arg(long)]
        path: Option<String>,

        /// Custom render template
        #[arg(long)]
        template: Option<String>,

        /// Extra CSS
        #[arg(long)]
        css: Option<String>,

        /// Extra JavaScript
        #[arg(long)]
        js: Option<String>,

        /// Author (defaults to config default-author)
        #[arg(short, long)]
        author: Option<String>,

        /// Snapshot message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Edit the page at a path
    #[command(alias = "e")]
    Edit {
        /// Path of the page
        path: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(short, long, value_parser = parse_format)]
        format: Option<ContentFormat>,

        /// Set a new slug (the path does not change)
        #[arg(long, conflicts_with = "reslug")]
        slug: Option<String>,

        /// Re-derive the slug from the title (the path does not change)
        #[arg(long)]
        reslug: bool,

        /// Move under the page at this path (the path does not change)
        #[arg(short, long, conflicts_with = "detach")]
        parent: Option<String>,

        /// Drop the parent link (the path does not change)
        #[arg(long)]
        detach: bool,

        /// Custom render template ("" removes it)
        #[arg(long)]
        template: Option<String>,

        #[arg(long)]
        css: Option<String>,

        #[arg(long)]
        js: Option<String>,

        #[arg(short, long)]
        author: Option<String>,

        /// Snapshot message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Hide a page from resolution
    #[command(alias = "rm")]
    Retire {
        path: String,

        #[arg(short, long)]
        message: Option<String>,
    },

    /// Make a retired page resolvable again
    Activate {
        path: String,

        #[arg(short, long)]
        message: Option<String>,
    },

    /// List pages
    #[command(alias = "ls")]
    List {
        /// Include retired pages
        #[arg(short, long)]
        all: bool,

        /// Only pages at or below this path
        #[arg(long)]
        under: Option<String>,
    },

    /// Resolve a path and show the page
    #[command(alias = "v")]
    Show { path: String },

    /// Show the snapshot history of a page
    #[command(alias = "log")]
    History {
        path: String,

        /// Show at most this many snapshots
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Print search documents for active pages as JSON
    Index,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., default-format)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
