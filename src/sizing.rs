//! Sizing context threaded through a layout pass, and the configuration it is
//! built from.

/// Margins and padding for the layout level currently being allocated.
///
/// The first container to see the margins consumes them with
/// [`take_margins`](SizingContext::take_margins) so that nested containers do
/// not apply them a second time. Padding is read-only and applies at every
/// level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizingContext {
    pub xmargin: i32,
    pub ymargin: i32,
    pub xpadding: i32,
    pub ypadding: i32,
}

impl SizingContext {
    pub fn new(config: &SizingConfig) -> Self {
        Self {
            xmargin: config.xmargin,
            ymargin: config.ymargin,
            xpadding: config.xpadding,
            ypadding: config.ypadding,
        }
    }

    /// Returns the current margins and zeroes them in the context.
    pub fn take_margins(&mut self) -> (i32, i32) {
        let margins = (self.xmargin, self.ymargin);
        self.xmargin = 0;
        self.ymargin = 0;
        margins
    }
}

/// Spacing applied to a window's layout when it is spaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SizingConfig {
    pub xmargin: i32,
    pub ymargin: i32,
    pub xpadding: i32,
    pub ypadding: i32,
}

impl SizingConfig {
    /// The spacing GTK's human interface guidelines ask for.
    pub const SPACED: SizingConfig = SizingConfig {
        xmargin: 12,
        ymargin: 12,
        xpadding: 12,
        ypadding: 6,
    };

    pub fn margins(mut self, xmargin: i32, ymargin: i32) -> Self {
        self.xmargin = xmargin;
        self.ymargin = ymargin;
        self
    }

    pub fn padding(mut self, xpadding: i32, ypadding: i32) -> Self {
        self.xpadding = xpadding;
        self.ypadding = ypadding;
        self
    }
}
