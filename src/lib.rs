// Main library file for MP2 calculations

pub mod config;
pub mod error;
pub mod io;
pub mod mp2_impl;
pub mod provider;
pub mod transform_impl;
