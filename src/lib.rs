//! bemtools: indentation shorthand to BEMJSON, HTML and stylesheet skeletons
//!
//! Layers, innermost first:
//! - `domain`: line parsing, tree building, expansion, sanitizing, BEMJSON model
//! - `application`: renderers and the conversion service
//! - `infrastructure`: I/O traits, notifiers and the service container
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
