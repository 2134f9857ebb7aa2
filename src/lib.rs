//! Convert SVG documents into cairo's XML drawing trace.
//!
//! The SVG is loaded and rendered by librsvg onto a cairo XML surface, which
//! serializes every drawing operation.  The trace is wrapped in an `<image>`
//! element carrying the document's size in pixels:
//!
//! ```text
//! <image width='100' height='50'>
//! ...cairo XML trace...
//! </image>
//! ```
//!
//! The [`Converter`] does the whole job for a pair of files:
//!
//! ```no_run
//! use svg2cairoxml::Converter;
//!
//! Converter::new("drawing.svg", "drawing.xml").convert().unwrap();
//! ```

#![warn(nonstandard_style, rust_2018_idioms, unused)]

#[macro_use]
mod log;

pub mod cli;
mod converter;
mod error;
mod session;
pub mod sizing;
pub mod xml_device;

pub use crate::converter::{ConvertOptions, Converter, Dpi};
pub use crate::error::ConvertError;
pub use crate::session::Session;
