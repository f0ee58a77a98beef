// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Quake Explorer project*
//!
//! This crate defines the basic datatypes used across the Quake Explorer
//! project (timeline engine, desktop dashboard, browser bindings).
//!
//! - [`Quake`]: a single earthquake event, validated on construction
//! - [`Dataset`]: the time ordered collection of events loaded from CSV
//! - [`TimeExtent`]: the earliest and latest instants of a dataset
//! - [`MagnitudeHistogram`]: event counts in 0.1 magnitude bins
//!
//! This crate aims to provide APIs for each type so that if a type is
//! instantiated, the developer can be sure it's valid.
//!

mod dataset;
mod extent;
mod magnitude;
mod quake;

pub use dataset::*;
pub use extent::*;
pub use magnitude::*;
pub use quake::*;
