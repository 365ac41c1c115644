use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "show-inclusion",
    version,
    about = "Show the list of included files of a C++ file",
    long_about = "Follow #include directives from a source file, build the inclusion graph and render it with Graphviz. Quoted includes are resolved relative to the including file and scanned recursively; angle-bracket includes are system leaves. Files sharing a basename are treated as the same node."
)]
pub struct Cli {
    /// Only report errors
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// The source file to analyze
    #[arg(value_name = "FILE")]
    pub input_pos: Option<PathBuf>,
    /// The source file to analyze (alternative to the positional argument)
    #[arg(short, long, value_name = "FILE", conflicts_with = "input_pos")]
    pub input: Option<PathBuf>,
}

impl InputArgs {
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        self.input.as_ref().or(self.input_pos.as_ref())
    }
}

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Literal text that introduces an include directive
    #[arg(long, value_name = "TEXT")]
    pub include_guard: Option<String>,
    /// Do not scan files deeper than N inclusion hops
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
    /// Path to a TOML configuration file (default: ./show-inclusion.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct DisplayArgs {
    /// Show system headers (<...>) and the edges into them
    #[arg(short = 's', long, default_value_t = false, overrides_with = "hide_system")]
    pub show_system: bool,
    /// Hide system headers even if the config file shows them
    #[arg(long, default_value_t = false, overrides_with = "show_system")]
    pub hide_system: bool,
    /// Draw the graph left to right instead of top to bottom
    #[arg(short = 'l', long, default_value_t = false, overrides_with = "top_to_bottom")]
    pub left_to_right: bool,
    /// Draw the graph top to bottom even if the config file says LR
    #[arg(long, default_value_t = false, overrides_with = "left_to_right")]
    pub top_to_bottom: bool,
    /// Colour theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,
    /// Node label font size
    #[arg(long, value_name = "N")]
    pub fontsize: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the inclusion graph to a temporary image and open it in a viewer
    Show {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        resolve: ResolveArgs,
        #[command(flatten)]
        display: DisplayArgs,
        /// Layout program fed with the DOT text (default: dot)
        #[arg(long, value_name = "PROGRAM")]
        layout_engine: Option<String>,
        /// Image viewer program (default: display)
        #[arg(long, value_name = "PROGRAM")]
        viewer: Option<String>,
        /// Image format passed to the layout engine as -T<format> (default: png)
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,
    },
    /// Print the DOT description of the inclusion graph
    Dot {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        resolve: ResolveArgs,
        #[command(flatten)]
        display: DisplayArgs,
        /// Write the DOT text to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Also save the resolved graph as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,
    },
    /// List the included files with their depth
    List {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        resolve: ResolveArgs,
        /// Include system headers in the listing
        #[arg(short = 's', long, default_value_t = false)]
        show_system: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
