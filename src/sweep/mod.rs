mod frame;
mod normalize;
pub mod saturate;
mod sequence;

pub use frame::{Dimensions, Frame, FrameSequence, PixelBuffer, SaturationLevel, DEFAULT_LEVEL};
pub use normalize::{constrain_dimensions, normalize, Constrained, DEFAULT_BOUNDS};
pub use sequence::{generate, generate_parallel};
