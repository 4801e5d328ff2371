pub mod batch;
pub mod loader;

pub use batch::{BatchRunner, CancelFlag};
pub use loader::load_pixels;
