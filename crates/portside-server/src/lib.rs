#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod handler;
pub mod service;

pub use portside_core::{BoxedError, Error, ErrorKind, Result};
