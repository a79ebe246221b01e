use color::Color;
use serde::{Deserialize, Serialize};

use crate::artist::{Artist, LineStyle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendPosition {
    #[default]
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub style: LineStyle,
}

/// Legend entries in the order their lines were added. Unlabelled lines are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub position: LegendPosition,
}

impl Legend {
    pub fn from_artists(artists: &[Artist], position: LegendPosition) -> Self {
        let entries = artists
            .iter()
            .filter_map(|artist| match artist {
                Artist::Line(line) => line.label.as_ref().map(|label| LegendEntry {
                    label: label.clone(),
                    color: line.color,
                    style: line.style,
                }),
                _ => None,
            })
            .collect();
        Self { entries, position }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
