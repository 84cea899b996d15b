use crate::block_position::BlockPosition;
use crate::edit_session::{ChangeWriter, EditReport, EditSession, Interrupt};
use crate::error::{EditError, Result};
use crate::filters::HeightMapFilter;
use crate::regions::Region;
use crate::world::BlockAccessor;
use crate::BlockState;
use log::debug;

/// Elevation of the topmost non-air block of every column of a region,
/// limited to the region's vertical extent.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMap {
    min_x: i32,
    min_z: i32,
    width: usize,
    length: usize,
    min_y: i32,
    max_y: i32,
    /// Row-major by z; `None` marks a column with no surface in range or a
    /// column outside the region's footprint.
    heights: Vec<Option<i32>>,
}

impl HeightMap {
    /// Scans every column of the region downward from its top.
    pub fn capture<W, R>(session: &EditSession<W>, region: &R) -> Result<Self>
    where
        W: BlockAccessor,
        R: Region + ?Sized,
    {
        let bounds = region
            .bounds()
            .ok_or_else(|| EditError::InvalidRegion("region is empty".to_string()))?;
        let (width, _, length) = bounds.get_dimensions();
        let mut map = HeightMap {
            min_x: bounds.min.0,
            min_z: bounds.min.2,
            width: width as usize,
            length: length as usize,
            min_y: bounds.min.1,
            max_y: bounds.max.1,
            heights: vec![None; width as usize * length as usize],
        };

        for (x, z) in region.columns() {
            let mut surface = None;
            for y in (map.min_y..=map.max_y).rev() {
                let pos = BlockPosition::new(x, y, z);
                if region.contains(pos) && !session.get_block(pos)?.is_air() {
                    surface = Some(y);
                    break;
                }
            }
            let index = map.index(x, z);
            map.heights[index] = surface;
        }
        Ok(map)
    }

    fn index(&self, x: i32, z: i32) -> usize {
        (z - self.min_z) as usize * self.width + (x - self.min_x) as usize
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Surface elevation of column (x, z), `None` when it has no surface.
    pub fn height_at(&self, x: i32, z: i32) -> Option<i32> {
        let in_footprint = x >= self.min_x
            && z >= self.min_z
            && ((x - self.min_x) as usize) < self.width
            && ((z - self.min_z) as usize) < self.length;
        if !in_footprint {
            return None;
        }
        self.heights[self.index(x, z)]
    }

    pub fn heights(&self) -> &[Option<i32>] {
        &self.heights
    }

    /// Runs `filter` `iterations` times, each pass feeding the next, and
    /// writes the result back as one operation.
    ///
    /// A raised column gets its surface block repeated up to the new top; a
    /// lowered column gets the surface block at the new top and air above
    /// it. Zero iterations writes nothing.
    pub fn apply_filter<W: BlockAccessor>(
        &self,
        session: &mut EditSession<W>,
        filter: &HeightMapFilter,
        iterations: u32,
    ) -> Result<EditReport> {
        let mut data = self.heights.clone();
        for _ in 0..iterations {
            data = filter.filter(&data, self.width, self.length);
        }
        debug!(
            "Applying {} filter pass(es) over {}x{} columns",
            iterations, self.width, self.length
        );
        Ok(session.perform("smooth", |w| self.write_back(w, &data)))
    }

    fn write_back<W: BlockAccessor>(
        &self,
        w: &mut ChangeWriter<'_, W>,
        data: &[Option<i32>],
    ) -> std::result::Result<(), Interrupt> {
        for z in 0..self.length {
            for x in 0..self.width {
                let index = z * self.width + x;
                let (Some(current), Some(target)) = (self.heights[index], data[index]) else {
                    continue;
                };
                let target = target.clamp(self.min_y, self.max_y);
                if target == current {
                    continue;
                }

                let column = BlockPosition::new(self.min_x + x as i32, 0, self.min_z + z as i32);
                let surface = w.get_block(column.with_y(current))?;
                if target > current {
                    for y in (current + 1)..=target {
                        w.set_block(column.with_y(y), &surface)?;
                    }
                } else {
                    w.set_block(column.with_y(target), &surface)?;
                    let air = BlockState::air();
                    for y in (target + 1)..=current {
                        w.set_block(column.with_y(y), &air)?;
                    }
                }
            }
        }
        Ok(())
    }
}
