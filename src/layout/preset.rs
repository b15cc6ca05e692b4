//! Named widget size classes.
//!
//! Every widget is sized by one of four presets. A preset maps to a fixed
//! footprint in grid units; the packing engine clamps it to the active
//! column count.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Footprint of a preset in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetDims {
    /// Width in columns.
    pub w: u16,
    /// Height in rows.
    pub h: u16,
    /// Minimum width the widget may be resized to.
    pub min_w: u16,
    /// Minimum height the widget may be resized to.
    pub min_h: u16,
}

/// Size class of a widget on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePreset {
    /// Small square card (3x2).
    Tile,
    /// Half-width strip (6x2).
    Wide,
    /// Narrow column (3x4).
    Tall,
    /// Full-width banner (12x6).
    Hero,
}

impl SizePreset {
    /// All presets in cycle order.
    pub const ALL: [SizePreset; 4] = [
        SizePreset::Tile,
        SizePreset::Wide,
        SizePreset::Tall,
        SizePreset::Hero,
    ];

    /// Returns the grid footprint of this preset.
    pub const fn dims(self) -> PresetDims {
        match self {
            SizePreset::Tile => PresetDims {
                w: 3,
                h: 2,
                min_w: 2,
                min_h: 2,
            },
            SizePreset::Wide => PresetDims {
                w: 6,
                h: 2,
                min_w: 4,
                min_h: 2,
            },
            SizePreset::Tall => PresetDims {
                w: 3,
                h: 4,
                min_w: 2,
                min_h: 3,
            },
            SizePreset::Hero => PresetDims {
                w: 12,
                h: 6,
                min_w: 6,
                min_h: 4,
            },
        }
    }

    /// Next preset in the resize cycle: tile → wide → tall → hero → tile.
    pub const fn next(self) -> Self {
        match self {
            SizePreset::Tile => SizePreset::Wide,
            SizePreset::Wide => SizePreset::Tall,
            SizePreset::Tall => SizePreset::Hero,
            SizePreset::Hero => SizePreset::Tile,
        }
    }

    /// Lowercase name used in stored layouts.
    pub const fn as_str(self) -> &'static str {
        match self {
            SizePreset::Tile => "tile",
            SizePreset::Wide => "wide",
            SizePreset::Tall => "tall",
            SizePreset::Hero => "hero",
        }
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error type for parsing a [`SizePreset`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePresetError(pub String);

impl fmt::Display for ParsePresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid size preset: {}", self.0)
    }
}

impl std::error::Error for ParsePresetError {}

impl FromStr for SizePreset {
    type Err = ParsePresetError;

    /// Exact lowercase match only; stored layouts are written by us.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tile" => Ok(SizePreset::Tile),
            "wide" => Ok(SizePreset::Wide),
            "tall" => Ok(SizePreset::Tall),
            "hero" => Ok(SizePreset::Hero),
            _ => Err(ParsePresetError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_visits_every_preset_and_wraps() {
        let mut preset = SizePreset::Tile;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(preset);
            preset = preset.next();
        }
        assert_eq!(seen, SizePreset::ALL);
        assert_eq!(preset, SizePreset::Tile);
    }

    #[test]
    fn test_dims_match_catalog() {
        assert_eq!(SizePreset::Wide.dims().w, 6);
        assert_eq!(SizePreset::Wide.dims().h, 2);
        assert_eq!(SizePreset::Tile.dims().w, 3);
        assert_eq!(SizePreset::Hero.dims().w, 12);
        assert_eq!(SizePreset::Hero.dims().h, 6);
    }

    #[test]
    fn test_min_never_exceeds_size() {
        for preset in SizePreset::ALL {
            let d = preset.dims();
            assert!(d.min_w <= d.w, "{preset}: min_w > w");
            assert!(d.min_h <= d.h, "{preset}: min_h > h");
        }
    }

    #[test]
    fn test_parse_roundtrips_display() {
        for preset in SizePreset::ALL {
            assert_eq!(preset.to_string().parse::<SizePreset>(), Ok(preset));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_wrong_case() {
        assert!("giant".parse::<SizePreset>().is_err());
        assert!("Tile".parse::<SizePreset>().is_err());
        assert!("".parse::<SizePreset>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&SizePreset::Hero).expect("serialize");
        assert_eq!(json, "\"hero\"");
        let parsed: SizePreset = serde_json::from_str("\"tall\"").expect("deserialize");
        assert_eq!(parsed, SizePreset::Tall);
    }
}
