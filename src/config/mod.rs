// src/config/mod.rs

pub mod consts;
pub mod dialect;
pub mod options;
