#![allow(rustdoc::bare_urls)]
#![doc = include_str!("../README.md")]

mod ast;
mod config;
mod error;
mod generate;
mod output;
mod regex;
mod select;

pub use ast::{Node, Op};
pub use config::Config;
pub use error::{Error, ErrorKind};
pub use generate::{generate, Flow};
pub use output::Output;
pub use crate::regex::Regex;
pub use select::{FromUnstructured, Selector};
