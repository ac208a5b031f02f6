pub mod engine;
pub mod mesh;
pub mod projection;
pub mod refraction;

pub use engine::{CausticEngine, CausticStats};
pub use mesh::LensMesh;
pub use projection::DisplayDomain;
pub use refraction::RefractionParams;
