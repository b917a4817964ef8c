//! Frame composition for the monochrome display

mod composer;
mod frame;
mod icons;

pub use composer::FrameComposer;
pub use frame::{Frame, HEIGHT, WIDTH};
