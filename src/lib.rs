//! Decorative canvas effects for a portfolio page: a particle "fluid" that
//! reacts to the pointer, and a custom cursor with a tapering trail.
//!
//! The simulations in [`field`] and [`trail`] are plain Rust and run anywhere;
//! [`web`] mounts them on the page and drives them from
//! `requestAnimationFrame`.

extern crate nalgebra_glm as glm;

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod geometry;
pub mod particle;
pub mod pointer;
pub mod renderer;
pub mod trail;
mod utils;
pub mod web;

use wasm_bindgen::prelude::*;

pub use crate::error::FxError;
pub use crate::web::{CursorEffect, FluidEffect};

// Smaller allocator for the wasm build
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Call once before creating any effect
#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already installed");
    }
}
