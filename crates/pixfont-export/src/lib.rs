//! Off-screen output for pixfont
//!
//! [`Framebuffer`] is a [`DrawSurface`](pixfont_core::DrawSurface) backed by
//! memory; [`PnmExporter`] turns one into a PPM or PGM image.

pub mod framebuffer;
pub mod pnm;

pub use framebuffer::{Framebuffer, SurfaceStats};
pub use pnm::{PnmExporter, PnmFormat};
