pub mod clock;
pub mod glyphs;
pub mod marquee;
pub mod render;

pub use clock::{AnimationClock, DISPLAY_PERIOD_MS, TICK_MS};
pub use marquee::{Marquee, MarqueeView, PASTE_BANNER};
pub use render::{render, Band, Frame, RenderInput};
