//! Platform-free core of the radial pulse visualizer.
//!
//! Nothing here touches the DOM or WebAudio: spectra arrive through
//! [`SpectrumSource`], dots leave through [`Renderer`], and everything in
//! between is plain data so it can be tested on the host.

pub mod clock;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod frames;
pub mod layout;
pub mod mapper;
pub mod render;
pub mod session;
pub mod smoother;
pub mod state;

pub use clock::*;
pub use color::*;
pub use config::*;
pub use error::*;
pub use frames::*;
pub use layout::*;
pub use mapper::*;
pub use render::*;
pub use session::*;
pub use smoother::*;
pub use state::*;
