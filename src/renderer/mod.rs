pub mod gpu;
pub mod point_cloud;
pub mod viewport;

pub use gpu::GpuState;
