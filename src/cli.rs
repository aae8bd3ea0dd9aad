//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::logging;
use crate::core::paths::absolute_root;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::tasks::delete::DEFAULT_DELETE;
use crate::tasks::rename::{JVIDEO_FROM, JVIDEO_TO};
use crate::tasks::replace_json::{default_replacements, Replacement};
use crate::tasks::tree::DEFAULT_MAX_DEPTH;

/// treetidy - maintenance tasks for translation content trees.
#[derive(Parser, Debug)]
#[command(name = "treetidy")]
#[command(
    author,
    version,
    about,
    long_about = r#"treetidy bundles the one-off maintenance tasks used to reorganize a
content tree of bible translation HTML/JSON assets.

Every task walks the tree under ROOT once and reports one line per action.
Tasks that change files run as a dry-run unless --apply is given, and never
overwrite an existing file unless --force is given. A failure on one file is
reported and the walk goes on.

Output formats:
- text: human-readable lines plus a summary (default)
- jsonl: one JSON object per action
- json: a single JSON array
- md: Markdown grouped by outcome

Examples:
    treetidy common-to-text ./templates/app
    treetidy common-to-text ./templates/app --apply --force
    treetidy flatten ./bibles/wordproject --apply
    treetidy replace-json ./translations/new --replace '"lookup"="look_up"'
    treetidy tree . --max-depth 2
"#
)]
pub struct Cli {
    /// Output format (text/jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "text",
        env = "TREETIDY_FORMAT",
        value_name = "FORMAT",
        long_help = "Select the output format for the report.\n\n\
Supported values:\n\
- text (default)\n\
- jsonl\n\
- json\n\
- md (markdown)"
    )]
    pub format: String,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored tags in text output. Colors are also off when NO_COLOR\n\
is set or a machine-readable format is selected."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log every visited directory and unchanged file to stderr. RUST_LOG, when\n\
set, takes precedence."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Root plus the mutation switches shared by the rename tasks
#[derive(Args, Debug)]
pub struct MutateArgs {
    /// Root folder to scan.
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Actually perform changes (default is a dry-run).
    #[arg(long)]
    pub apply: bool,

    /// Overwrite an existing destination.
    #[arg(long)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rename commonInterface.json or commonContent.json to text.json, recursively.
    #[command(
        long_about = "Recursively rename commonInterface.json or commonContent.json to text.json.\n\n\
A directory holding both candidates is skipped and reported for manual resolution.\n\
An existing text.json is only replaced with --force.\n\n\
Examples:\n\
  treetidy common-to-text ./templates/app\n\
  treetidy common-to-text ./templates/app --apply\n"
    )]
    CommonToText {
        #[command(flatten)]
        args: MutateArgs,
    },

    /// Rename every file with an exact name, recursively.
    #[command(
        long_about = "Rename every file named FROM to TO anywhere under ROOT. Case-only\n\
renames work on case-insensitive filesystems too.\n\n\
Example:\n\
  treetidy rename ./translations/languages --from jVideoStructured.json --to jvideoStructured.json\n"
    )]
    Rename {
        #[command(flatten)]
        args: MutateArgs,

        /// Name to rename from.
        #[arg(long, default_value = JVIDEO_FROM, value_name = "NAME")]
        from: String,

        /// Name to rename to.
        #[arg(long, default_value = JVIDEO_TO, value_name = "NAME")]
        to: String,
    },

    /// Rename *.htm files to *.html, recursively.
    HtmToHtml {
        #[command(flatten)]
        args: MutateArgs,
    },

    /// Rename *Structured.json to *.json in each language folder.
    #[command(
        long_about = "Rename files ending in Structured.json to end in .json, inside each\n\
immediate subdirectory of ROOT (one folder per language).\n"
    )]
    StripStructured {
        #[command(flatten)]
        args: MutateArgs,
    },

    /// Rename DBS* to Dbs* and Leadership to Lead, in ROOT only.
    RenameDbs {
        #[command(flatten)]
        args: MutateArgs,
    },

    /// Merge duplicated nesting (af/af) into the parent directory.
    #[command(
        long_about = "Find directories named like their parent (af/af), move their entries up\n\
into the parent and remove the emptied directory.\n\n\
An entry that already exists in the parent is skipped (and the nested directory\n\
kept) unless it is an identical file, which is simply dropped, or --force is given.\n"
    )]
    Flatten {
        #[command(flatten)]
        args: MutateArgs,
    },

    /// Delete named files from each language folder.
    #[command(
        long_about = "Delete each --name file from every immediate subdirectory of ROOT.\n\
Missing files are reported as skipped.\n\n\
Example:\n\
  treetidy delete ./translations/languages --name dbs.json --name lead.json --apply\n"
    )]
    Delete {
        /// Root folder holding one folder per language.
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// File name to delete (repeatable).
        #[arg(long = "name", value_name = "FILE", default_values = DEFAULT_DELETE)]
        names: Vec<String>,

        /// Actually delete (default is a dry-run).
        #[arg(long)]
        apply: bool,
    },

    /// Regex find/replace inside JSON files.
    #[command(
        long_about = r#"Apply regex replacements to every JSON file under ROOT. Files that are
not valid JSON, or that would stop being valid JSON, are reported and left
untouched. Text is written back verbatim apart from the matches.

Without --replace, the bundle key renames are applied:
    "lookback" -> "look_back", "lookup" -> "look_up", "lookforward" -> "look_forward"

Example:
    treetidy replace-json ./translations/new --replace '"lookup"="look_up"' --apply
"#
    )]
    ReplaceJson {
        /// Root folder to scan.
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Replacement as PATTERN=REPLACEMENT, split at the first '=' (repeatable).
        #[arg(long = "replace", value_name = "PATTERN=REPLACEMENT")]
        replacements: Vec<Replacement>,

        /// File extensions to process.
        #[arg(long = "ext", value_name = "EXT", default_value = "json", value_delimiter = ',')]
        extensions: Vec<String>,

        /// Actually write changes (default is a dry-run).
        #[arg(long)]
        apply: bool,
    },

    /// Report HTML files with more than N occurrences of a tag.
    FindTags {
        /// Root folder to scan.
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Tag (CSS selector) to count.
        #[arg(long, default_value = "h3", value_name = "TAG")]
        tag: String,

        /// Report files with more than this many matches.
        #[arg(long, default_value = "1", value_name = "N")]
        more_than: usize,
    },

    /// Print a directory tree.
    Tree {
        /// Root folder to print.
        #[arg(value_name = "ROOT", default_value = ".")]
        root: PathBuf,

        /// Deepest directory level to descend into.
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, value_name = "N")]
        max_depth: usize,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose, cli.quiet);

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    if cli.no_color || format != OutputFormat::Text {
        colored::control::set_override(false);
    }
    let config = RenderConfig::with_pretty(format, cli.pretty);

    match cli.command {
        Commands::CommonToText { args } => crate::tasks::rename::run_common_to_text(
            &absolute_root(&args.root),
            args.apply,
            args.force,
            config,
        ),

        Commands::Rename { args, from, to } => crate::tasks::rename::run_rename_exact(
            &absolute_root(&args.root),
            &from,
            &to,
            args.apply,
            args.force,
            config,
        ),

        Commands::HtmToHtml { args } => crate::tasks::rename::run_htm_to_html(
            &absolute_root(&args.root),
            args.apply,
            args.force,
            config,
        ),

        Commands::StripStructured { args } => crate::tasks::rename::run_strip_structured(
            &absolute_root(&args.root),
            args.apply,
            args.force,
            config,
        ),

        Commands::RenameDbs { args } => crate::tasks::rename::run_rename_dbs(
            &absolute_root(&args.root),
            args.apply,
            args.force,
            config,
        ),

        Commands::Flatten { args } => crate::tasks::flatten::run_flatten(
            &absolute_root(&args.root),
            args.apply,
            args.force,
            config,
        ),

        Commands::Delete { root, names, apply } => {
            crate::tasks::delete::run_delete(&absolute_root(&root), &names, apply, config)
        }

        Commands::ReplaceJson {
            root,
            replacements,
            extensions,
            apply,
        } => {
            let replacements = if replacements.is_empty() {
                default_replacements()
            } else {
                replacements
            };
            crate::tasks::replace_json::run_replace_json(
                &absolute_root(&root),
                &extensions,
                &replacements,
                apply,
                config,
            )
        }

        Commands::FindTags {
            root,
            tag,
            more_than,
        } => crate::tasks::find_tags::run_find_tags(&absolute_root(&root), &tag, more_than, config),

        Commands::Tree { root, max_depth } => {
            crate::tasks::tree::run_tree(&absolute_root(&root), max_depth, config)
        }
    }
}
