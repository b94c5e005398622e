mod animation;
mod png;

pub use animation::{FRAME_DELAY_MS, write_animation};
pub use png::save_png;
