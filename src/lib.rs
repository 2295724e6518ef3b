//! Tile installation system finder.
//!
//! This crate loads a catalog of installation systems from JSON, filters it
//! by category, secondary attributes and free text, renders the matches, and
//! exports a per-system text package.
//!
//! The binary `cbp-finder` exposes the same operations on the command line.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod model;
pub mod panel;
pub mod query;
pub mod view;

// Optional GUI/egui functionality lives behind the `egui` feature flag.
#[cfg(feature = "egui")]
pub mod egui_app;
