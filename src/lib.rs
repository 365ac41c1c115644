//! show-inclusion — include graph explorer for C and C++ sources
//!
//! Follow `#include` directives from a root file, build a deduplicated
//! inclusion graph with per-node depth, and render it as a Graphviz diagram.
//!
//! # Features
//! - Quoted includes are resolved against the including file's directory and scanned recursively
//! - Angle-bracket includes become system leaves, hidden from diagrams unless requested
//! - Nodes are deduplicated by basename, which also makes include cycles terminate
//! - DOT output with one rank row per inclusion depth; PNG/SVG through an external layout engine
//!
//! # Quickstart (Library)
//! ```no_run
//! use show_inclusion::graph::resolver::{ResolveOptions, Resolver};
//! use show_inclusion::visualization::{DotGenerator, DotOptions};
//!
//! let graph = Resolver::new(ResolveOptions::default())
//!     .resolve(std::path::Path::new("src/main.cpp"))
//!     .expect("resolve includes");
//! let dot = DotGenerator::new().generate_dot("main.cpp", &graph, DotOptions::default());
//! println!("{dot}");
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! show-inclusion dot src/main.cpp --show-system > includes.dot
//! show-inclusion show -i src/main.cpp --left-to-right
//! show-inclusion list src/main.cpp --format json
//! ```
//!
//! # Limitations
//! This is not a preprocessor: macros, `#if` blocks and block comments are not
//! understood, and only a line that *starts* with `//` is treated as a comment.
pub mod app;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod parser;
pub mod utils;
pub mod visualization;
