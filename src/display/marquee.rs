/// Scrolled across line two while the thermal-paste alert is active.
pub const PASTE_BANNER: &str = "                 Check GPU Thermal Paste!";
/// Ticks each follow-up view stays on screen after the banner has scrolled by.
pub const HOLD_TICKS: usize = 8;

/// What line two shows for the current marquee offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarqueeView {
    Banner(usize),
    GpuTemperature,
    HotSpot,
}

/// Scroll offset into a fixed banner, cycling banner → GPU temp → hot spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marquee {
    text: &'static str,
    len: usize,
    offset: usize,
}

impl Default for Marquee {
    fn default() -> Self {
        Self::new(PASTE_BANNER)
    }
}

impl Marquee {
    pub fn new(text: &'static str) -> Self {
        Self {
            text,
            len: text.chars().count(),
            offset: 0,
        }
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Step one display tick.
    pub fn advance(&mut self) {
        self.offset += 1;
        if self.offset >= self.len + 2 * HOLD_TICKS {
            self.offset = 0;
        }
    }

    pub fn view(&self) -> MarqueeView {
        if self.offset <= self.len {
            MarqueeView::Banner(self.offset)
        } else if self.offset < self.len + HOLD_TICKS {
            MarqueeView::GpuTemperature
        } else {
            MarqueeView::HotSpot
        }
    }

    /// Banner text rotated left by `offset` characters.
    pub fn rotated(&self, offset: usize) -> String {
        rotate(self.text, offset)
    }
}

/// Rotate `text` left by `offset` characters, wrapping the head to the tail.
pub fn rotate(text: &str, offset: usize) -> String {
    let len = text.chars().count();
    if len == 0 {
        return String::new();
    }
    let split = offset % len;
    text.chars().skip(split).chain(text.chars().take(split)).collect()
}
