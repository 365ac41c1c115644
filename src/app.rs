use crate::cli::{Cli, Commands, DisplayArgs, InputArgs, OutputFormat, ResolveArgs, ThemeArg};
use crate::graph::resolver::{ResolveOptions, Resolver};
use crate::graph::{IncludeGraph, Node, ROOT};
use crate::parser::DEFAULT_INCLUDE_GUARD;
use crate::utils::config::{self, Config};
use crate::utils::workdir;
use crate::visualization::image::ExternalTools;
use crate::visualization::{DotGenerator, DotOptions, DotTheme, RankDir};
use clap::CommandFactory;
use clap_complete::generate;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the flag-derived level.
pub fn init_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

struct Resolved {
    root: PathBuf,
    config: Config,
    graph: IncludeGraph,
}

/// Run the CLI logic in-process.
///
/// Returns an exit code: 0 on success, 1 on a failed resolution or rendering,
/// 2 when no input file was given.
#[must_use]
pub fn run_cli(cli: Cli) -> i32 {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = env!("CARGO_PKG_NAME");
            let mut out = io::stdout();
            generate(shell, &mut cmd, bin_name, &mut out);
            0
        }
        Commands::Show { input, resolve, display, layout_engine, viewer, format } => {
            let resolved = match resolve_input(&input, &resolve) {
                Ok(r) => r,
                Err(code) => return code,
            };
            let opts = dot_options(&display, &resolved.config);
            let dot = DotGenerator::new().generate_dot(&root_label(&resolved), &resolved.graph, opts);

            let tools_cfg = resolved.config.tools.clone().unwrap_or_default();
            let defaults = ExternalTools::default();
            let tools = ExternalTools {
                layout_engine: layout_engine.or(tools_cfg.layout_engine).unwrap_or(defaults.layout_engine),
                viewer: viewer.or(tools_cfg.viewer).unwrap_or(defaults.viewer),
                format: format.or(tools_cfg.format).unwrap_or(defaults.format),
            };
            if let Err(e) = tools.show(&dot) {
                eprintln!("{e}");
                return 1;
            }
            0
        }
        Commands::Dot { input, resolve, display, output, json } => {
            let resolved = match resolve_input(&input, &resolve) {
                Ok(r) => r,
                Err(code) => return code,
            };
            let opts = dot_options(&display, &resolved.config);
            let dot = DotGenerator::new().generate_dot(&root_label(&resolved), &resolved.graph, opts);

            if let Some(json_path) = json {
                if let Err(e) = resolved.graph.save_json(&json_path) {
                    eprintln!("Failed to write JSON output {}: {e}", json_path.display());
                    return 1;
                }
            }
            match output {
                Some(dot_path) => {
                    if let Err(e) = fs::write(&dot_path, dot) {
                        eprintln!("Failed to write DOT output {}: {e}", dot_path.display());
                        return 1;
                    }
                    if !cli.quiet {
                        println!("Wrote {}", dot_path.display());
                    }
                }
                None => print!("{dot}"),
            }
            0
        }
        Commands::List { input, resolve, show_system, format } => {
            let resolved = match resolve_input(&input, &resolve) {
                Ok(r) => r,
                Err(code) => return code,
            };
            let show_system = show_system
                || resolved.config.dot.as_ref().and_then(|d| d.show_system).unwrap_or(false);
            let rows: Vec<(usize, &Node)> = resolved
                .graph
                .iter()
                .filter(|(idx, n)| *idx == ROOT || show_system || !n.is_system)
                .collect();

            if matches!(format, OutputFormat::Json) {
                #[derive(serde::Serialize)]
                struct Row<'a> {
                    index: usize,
                    depth: usize,
                    kind: &'static str,
                    path: &'a str,
                    includes: Vec<usize>,
                }
                let out: Vec<Row> = rows
                    .iter()
                    .map(|(idx, n)| Row {
                        index: *idx,
                        depth: n.depth,
                        kind: kind_of(*idx, n),
                        path: &n.path,
                        includes: n
                            .targets
                            .iter()
                            .copied()
                            .filter(|t| show_system || resolved.graph.get(*t).is_some_and(|m| !m.is_system))
                            .collect(),
                    })
                    .collect();
                match serde_json::to_string_pretty(&out) {
                    Ok(s) => println!("{s}"),
                    Err(e) => {
                        eprintln!("JSON encode error: {e}");
                        return 1;
                    }
                }
            } else {
                let body: Vec<Vec<String>> = rows
                    .iter()
                    .map(|(idx, n)| {
                        vec![
                            idx.to_string(),
                            n.depth.to_string(),
                            kind_of(*idx, n).to_string(),
                            if n.is_system { n.label() } else { n.path.clone() },
                        ]
                    })
                    .collect();
                let table = crate::utils::table::render(&["#", "Depth", "Kind", "Path"], &body);
                println!("{table}");
            }
            tracing::info!(
                "listed {} of {} files from {}",
                rows.len(),
                resolved.graph.len(),
                resolved.root.display()
            );
            0
        }
    }
}

fn resolve_input(input: &InputArgs, args: &ResolveArgs) -> Result<Resolved, i32> {
    let Some(path) = input.path() else {
        eprintln!("Missing input file. Provide <FILE> or --input <FILE>.");
        return Err(2);
    };
    let root = match workdir::ensure_within_current(path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            return Err(1);
        }
    };
    let config = config::load(args.config.as_deref(), Path::new("."));

    let resolve_cfg = config.resolve.clone().unwrap_or_default();
    let include_guard = args
        .include_guard
        .clone()
        .or(resolve_cfg.include_guard)
        .unwrap_or_else(|| DEFAULT_INCLUDE_GUARD.to_string());
    // An empty guard would match at the start of every line
    if include_guard.trim().is_empty() {
        eprintln!("The include guard must not be empty.");
        return Err(2);
    }
    let opts = ResolveOptions { include_guard, max_depth: args.max_depth.or(resolve_cfg.max_depth) };
    match Resolver::new(opts).resolve(&root) {
        Ok(graph) => Ok(Resolved { root, config, graph }),
        Err(e) => {
            eprintln!("Resolution failed: {e}");
            Err(1)
        }
    }
}

fn dot_options(display: &DisplayArgs, config: &Config) -> DotOptions {
    let cfg = config.dot.clone().unwrap_or_default();
    let defaults = DotOptions::default();
    let rankdir = if display.left_to_right {
        RankDir::LR
    } else if display.top_to_bottom {
        RankDir::TB
    } else {
        match cfg.rankdir.as_deref() {
            None => defaults.rankdir,
            Some(r) if r.eq_ignore_ascii_case("LR") => RankDir::LR,
            Some(r) if r.eq_ignore_ascii_case("TB") => RankDir::TB,
            Some(other) => {
                tracing::warn!("ignoring unknown rankdir '{}' in config (expected TB or LR)", other);
                defaults.rankdir
            }
        }
    };
    let theme = match display.theme {
        Some(ThemeArg::Dark) => DotTheme::Dark,
        Some(ThemeArg::Light) => DotTheme::Light,
        None => match cfg.theme.as_deref() {
            None => defaults.theme,
            Some(t) if t.eq_ignore_ascii_case("light") => DotTheme::Light,
            Some(t) if t.eq_ignore_ascii_case("dark") => DotTheme::Dark,
            Some(other) => {
                tracing::warn!("ignoring unknown theme '{}' in config (expected light or dark)", other);
                defaults.theme
            }
        },
    };
    let show_system = if display.show_system {
        true
    } else if display.hide_system {
        false
    } else {
        cfg.show_system.unwrap_or(defaults.show_system)
    };
    DotOptions {
        show_system,
        rankdir,
        theme,
        fontsize: display.fontsize.or(cfg.fontsize).unwrap_or(defaults.fontsize),
    }
}

fn root_label(resolved: &Resolved) -> String {
    resolved.graph.root().map(Node::label).unwrap_or_default()
}

fn kind_of(idx: usize, node: &Node) -> &'static str {
    if idx == ROOT {
        "root"
    } else if node.is_system {
        "system"
    } else {
        "local"
    }
}
