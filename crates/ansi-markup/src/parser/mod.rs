//! Markup scanning and rendering.
//!
//! This module contains the scanner, which turns text into tokens, and the
//! stack renderer, which turns tokens into output.

mod render;
mod scanner;

pub use render::{RenderMode, render};
pub use scanner::{Location, Scanner, Symbol, Token};
