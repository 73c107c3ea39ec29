//! Terminal choropleth of US states, shaded by the deaths each reported today.
//!
//! Hovering a state selects it; every selection change refetches the
//! all-states list and the selected state's detail from a disease.sh style API.

pub mod app;
pub mod braille;
pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod map;
pub mod severity;
pub mod stats;
pub mod store;
pub mod telemetry;
pub mod ui;
