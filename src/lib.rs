#![allow(warnings)]

pub mod arguments;
pub mod config;
pub mod filtering;
pub mod gallery;
pub mod listings;
pub mod logger;
pub mod records;
