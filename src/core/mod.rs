//! Core types: coordinates, track shapes, colours, cells, grids, trains,
//! configuration and errors.
//!
//! Everything here is plain data with value semantics. The per-block
//! behaviour lives in `sim`.

pub mod cell;
pub mod color;
pub mod config;
pub mod coord;
pub mod error;
pub mod grid;
pub mod track;
pub mod train;

pub use cell::{Cell, TargetDirection};
pub use color::{mix, Color};
pub use config::{
    EngineConfig, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_GRID_SIZE, DEFAULT_TICKS_PER_BLOCK,
};
pub use coord::{Coordinate, Edge};
pub use error::{EngineError, EngineResult};
pub use grid::Grid;
pub use track::{resolve, TrackShape};
pub use train::Train;
