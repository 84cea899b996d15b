//! Bulk editing for Minecraft-style voxel worlds.
//!
//! An [`EditSession`] applies region-wide edits (fill, replace, overlay,
//! walls, faces, terrain smoothing, move and stack) through a host supplied
//! [`BlockAccessor`], and keeps every change so it can be undone and redone.
//!
//! ```
//! use voxedit::{BlockState, CuboidRegion, EditSession, MemoryWorld};
//!
//! let mut session = EditSession::new(MemoryWorld::default());
//! let region = CuboidRegion::new((0, 0, 0), (2, 2, 2));
//! let report = session.set_blocks_to(&region, &BlockState::new("minecraft:stone"));
//! assert_eq!(report.affected, 27);
//!
//! session.undo().unwrap();
//! assert_eq!(session.world().count_non_air_blocks(), 0);
//! ```

pub mod block_position;
pub mod block_state;
pub mod bounding_box;
pub mod config;
pub mod edit_session;
pub mod enums;
pub mod error;
pub mod filters;
pub mod height_map;
pub mod mask;
pub mod patterns;
pub mod regions;
pub mod world;

pub use block_position::{BlockPosition, Direction};
pub use block_state::BlockState;
pub use bounding_box::BoundingBox;
pub use config::{EditConfig, HistoryConfig, SmoothingConfig};
pub use edit_session::{ChangeBatch, ChangeRecord, EditReport, EditSession, EditStatus};
pub use enums::{PatternEnum, RegionEnum};
pub use error::{AccessorError, EditError, Result};
pub use filters::{HeightMapFilter, Kernel};
pub use height_map::HeightMap;
pub use mask::BlockMask;
pub use patterns::{Pattern, SingleBlockPattern, WeightedPattern};
pub use regions::{CuboidRegion, PointSetRegion, Region};
pub use world::{BlockAccessor, MemoryWorld};
