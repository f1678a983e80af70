//! Host wiring
//!
//! - `headless`: kinematic stand-in host (native binary, tests)
//! - `web`: wasm-bindgen facade for a browser slide deck

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod web;
