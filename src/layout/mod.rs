//! Layout engine for the dashboard.
//!
//! A user's layout is an ordered list of widget ids plus a size preset for
//! each. This module heals untrusted stored layouts ([`normalize`]), maps
//! viewport widths to column counts ([`BreakpointTable`]) and packs the
//! layout onto a grid of any column count ([`pack`]).

mod breakpoints;
mod model;
mod normalize;
mod packing;
mod preset;

pub use breakpoints::{Breakpoint, BreakpointError, BreakpointTable};
pub use model::{LayoutModel, SCHEMA_VERSION};
pub use normalize::{normalize, normalize_str};
pub use packing::{grid_height, pack, pack_breakpoints, pack_model, BreakpointLayout, PlacedItem};
pub use preset::{ParsePresetError, PresetDims, SizePreset};
