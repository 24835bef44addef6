use serde::{Deserialize, Serialize};

/// Main-axis packing of the displayed grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    #[default]
    Start,
    Center,
    End,
}

impl Justification {
    pub const ALL: [Self; 3] = [Self::Start, Self::Center, Self::End];

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Left align",
            Self::Center => "Center",
            Self::End => "Right align",
        }
    }

    /// Share of a row's free space placed before its first item.
    pub fn lead_fraction(self) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
        }
    }
}

/// Process-wide presentation toggles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub justification: Justification,
    pub margins_enabled: bool,
    pub borders_enabled: bool,
}

impl LayoutSettings {
    pub fn set_justification(&mut self, justification: Justification) {
        *self = Self {
            justification,
            ..*self
        };
    }

    pub fn toggle_margins(&mut self) {
        *self = Self {
            margins_enabled: !self.margins_enabled,
            ..*self
        };
    }

    pub fn toggle_borders(&mut self) {
        *self = Self {
            borders_enabled: !self.borders_enabled,
            ..*self
        };
    }
}
