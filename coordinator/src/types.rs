/// A single pointer reading delivered by the host input system.
///
/// Samples are ephemeral: they are consumed immediately and never stored
/// beyond the velocity tracker's bounded window.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerSample {
    /// Vertical pointer position, in host units (pixels, cells, ...).
    pub y: f32,
    pub timestamp_ms: u64,
}

impl PointerSample {
    pub fn new(y: f32, timestamp_ms: u64) -> Self {
        Self { y, timestamp_ms }
    }
}

/// Which surface a scroll delta originated from.
///
/// The coordinator arbitrates the two differently: header-origin deltas skip
/// pre-scroll entirely and are applied in full during post-scroll, while
/// content-origin deltas are partially consumed up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollOrigin {
    /// The header's own drag surface.
    Header,
    /// The scrollable content below the header.
    Content,
}

/// Header geometry supplied by the host's measurement pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extents {
    /// Full extent of the collapsible header.
    pub header: u32,
    /// Extent of the band that stays visible when fully collapsed.
    pub hover: u32,
}

impl Extents {
    pub fn new(header: u32, hover: u32) -> Self {
        Self { header, hover }
    }

    /// The header's collapsible travel: `header - hover`, never negative.
    pub fn max_offset(&self) -> i32 {
        self.header.saturating_sub(self.hover).min(i32::MAX as u32) as i32
    }
}

/// A lightweight snapshot of the coordinator's observable state.
///
/// This is useful for driving rendering without coupling the coordinator to
/// any specific UI framework.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinatorState {
    /// Current header offset in `[0, max_offset]` (0 = fully expanded).
    pub offset: i32,
    pub max_offset: i32,
    pub is_flinging: bool,
}
