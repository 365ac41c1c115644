use show_inclusion::app::run_cli;
use show_inclusion::cli::{Cli, Commands, DisplayArgs, InputArgs, OutputFormat, ResolveArgs, ThemeArg};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn input(path: &str) -> InputArgs {
    InputArgs { input_pos: Some(PathBuf::from(path)), input: None }
}

fn resolve_args() -> ResolveArgs {
    ResolveArgs { include_guard: None, max_depth: None, config: None }
}

fn display_args() -> DisplayArgs {
    DisplayArgs {
        show_system: false,
        hide_system: false,
        left_to_right: false,
        top_to_bottom: false,
        theme: None,
        fontsize: None,
    }
}

#[test]
fn app_dot_writes_dot_and_json() {
    let dir = tempdir().unwrap();
    let dot_out = dir.path().join("graph.dot");
    let json_out = dir.path().join("graph.json");

    let cli = Cli {
        quiet: true,
        verbose: 0,
        command: Commands::Dot {
            input: input("tests/fixtures/cycle/main.cpp"),
            resolve: resolve_args(),
            display: DisplayArgs { left_to_right: true, theme: Some(ThemeArg::Dark), ..display_args() },
            output: Some(dot_out.clone()),
            json: Some(json_out.clone()),
        },
    };

    assert_eq!(run_cli(cli), 0);
    let dot_str = fs::read_to_string(&dot_out).unwrap();
    assert!(dot_str.contains("rankdir=LR"));
    assert!(dot_str.contains("n1 -> n2;"));
    assert!(dot_str.contains("n2 -> n1;"));

    let graph = show_inclusion::graph::IncludeGraph::load_json(&json_out).unwrap();
    assert_eq!(graph.len(), 3);
}

#[test]
fn app_list_both_formats() {
    for format in [OutputFormat::Text, OutputFormat::Json] {
        let cli = Cli {
            quiet: false,
            verbose: 0,
            command: Commands::List {
                input: input("tests/fixtures/basic/main.cpp"),
                resolve: resolve_args(),
                show_system: true,
                format,
            },
        };
        assert_eq!(run_cli(cli), 0);
    }
}

#[test]
fn app_missing_input_returns_two() {
    let cli = Cli {
        quiet: false,
        verbose: 0,
        command: Commands::Dot {
            input: InputArgs { input_pos: None, input: None },
            resolve: resolve_args(),
            display: display_args(),
            output: None,
            json: None,
        },
    };
    assert_eq!(run_cli(cli), 2);
}

#[test]
fn app_refuses_input_outside_working_directory() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("main.cpp");
    fs::write(&file, "#include <vector>\n").unwrap();

    let cli = Cli {
        quiet: false,
        verbose: 0,
        command: Commands::List {
            input: InputArgs { input_pos: None, input: Some(file) },
            resolve: resolve_args(),
            show_system: false,
            format: OutputFormat::Text,
        },
    };
    assert_eq!(run_cli(cli), 1);
}

#[test]
fn app_show_reports_missing_layout_engine() {
    let cli = Cli {
        quiet: false,
        verbose: 0,
        command: Commands::Show {
            input: input("tests/fixtures/basic/main.cpp"),
            resolve: resolve_args(),
            display: display_args(),
            layout_engine: Some("show-inclusion-missing-engine".into()),
            viewer: Some("true".into()),
            format: None,
        },
    };
    assert_eq!(run_cli(cli), 1);
}
