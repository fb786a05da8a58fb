use std::fmt;

use winit::dpi::PhysicalSize;

/// Rendering viewport in physical pixels.
///
/// Updated from window resize notifications and applied to every render pass.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area viewport (minimized window) cannot be drawn into.
    #[inline]
    pub fn is_drawable(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Total pixel count; computed in `u64` so large surfaces cannot overflow.
    #[inline]
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    #[inline]
    pub fn as_f32(self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

impl From<PhysicalSize<u32>> for Viewport {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Formats as the resize report: `x=W y=H pixels=W*H`.
impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={} y={} pixels={}",
            self.width,
            self.height,
            self.pixel_count()
        )
    }
}
