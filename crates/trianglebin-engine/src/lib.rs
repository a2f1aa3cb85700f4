//! trianglebin engine crate.
//!
//! Owns the platform and GPU runtime pieces: the window loop, the presentation
//! surface, fault reporting, logging, and the overlay renderers used by the
//! debug UI.

pub mod device;
pub mod fault;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
