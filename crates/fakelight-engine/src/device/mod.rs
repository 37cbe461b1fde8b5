//! GPU device management.
//!
//! Creates the wgpu Instance/Adapter/Device/Queue without a surface; every
//! frame is rendered offscreen.

mod gpu;
mod init;

pub use gpu::Gpu;
pub use init::GpuInit;
