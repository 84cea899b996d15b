use super::{EditReport, EditSession};
use crate::block_position::BlockPosition;
use crate::error::{EditError, Result};
use crate::regions::Region;
use crate::world::BlockAccessor;
use crate::BlockState;
use log::debug;

fn check_direction(direction: BlockPosition) -> Result<()> {
    if direction.is_axis_unit() {
        Ok(())
    } else {
        Err(EditError::InvalidDirection(format!(
            "{} is not a unit vector along an axis",
            direction
        )))
    }
}

fn out_of_range(direction: BlockPosition, distance: u32) -> EditError {
    EditError::InvalidDirection(format!(
        "{} blocks along {} leaves the coordinate range",
        distance, direction
    ))
}

/// `direction * distance`, rejecting distances that do not fit the
/// coordinate range.
fn displacement(direction: BlockPosition, distance: u32) -> Result<BlockPosition> {
    i32::try_from(distance)
        .ok()
        .and_then(|steps| direction.checked_mul(steps))
        .ok_or_else(|| out_of_range(direction, distance))
}

/// Fails unless the region is non-empty and still fits the coordinate range
/// after being displaced by `offset`.
fn check_displaced<R: Region + ?Sized>(
    region: &R,
    direction: BlockPosition,
    distance: u32,
    offset: BlockPosition,
) -> Result<()> {
    let bounds = region
        .bounds()
        .ok_or_else(|| EditError::InvalidRegion("region is empty".to_string()))?;
    bounds
        .checked_translate(offset)
        .map(|_| ())
        .ok_or_else(|| out_of_range(direction, distance))
}

impl<W: BlockAccessor> EditSession<W> {
    /// Moves the region's contents `count` blocks along `direction`.
    ///
    /// All source blocks are read before anything is written, so source and
    /// destination may overlap. Source positions not covered by the moved
    /// region are then set to `fill`. With `copy_air` off, air in the source
    /// is not copied and the destination keeps what it had.
    pub fn move_region<R>(
        &mut self,
        region: &R,
        direction: impl Into<BlockPosition>,
        count: u32,
        copy_air: bool,
        fill: &BlockState,
    ) -> Result<EditReport>
    where
        R: Region + ?Sized,
    {
        let direction = direction.into();
        check_direction(direction)?;
        let displacement = displacement(direction, count)?;
        check_displaced(region, direction, count, displacement)?;
        debug!(
            "move_region of {} position(s) by {}",
            region.volume(),
            displacement
        );

        Ok(self.perform("move", |w| {
            let mut contents = Vec::with_capacity(region.volume());
            for pos in region.iter() {
                contents.push((pos, w.get_block(pos)?));
            }

            for (pos, block) in &contents {
                if !copy_air && block.is_air() {
                    continue;
                }
                w.set_block(*pos + displacement, block)?;
            }

            for (pos, _) in &contents {
                let covered = pos
                    .checked_sub(displacement)
                    .is_some_and(|origin| region.contains(origin));
                if !covered {
                    w.set_block(*pos, fill)?;
                }
            }
            Ok(())
        }))
    }

    /// Repeats the region's contents `count` times along `direction`, each
    /// copy offset by the region's extent on that axis. The source is left
    /// as it is and every copy is taken from the original contents.
    pub fn stack_region<R>(
        &mut self,
        region: &R,
        direction: impl Into<BlockPosition>,
        count: u32,
        copy_air: bool,
    ) -> Result<EditReport>
    where
        R: Region + ?Sized,
    {
        let direction = direction.into();
        check_direction(direction)?;
        let (width, height, length) = region.bounding_dimensions();
        let extent =
            direction.x.abs() * width + direction.y.abs() * height + direction.z.abs() * length;
        let furthest = u32::try_from(extent)
            .ok()
            .and_then(|extent| extent.checked_mul(count))
            .ok_or_else(|| out_of_range(direction, count))?;
        let furthest = displacement(direction, furthest)?;
        check_displaced(region, direction, count, furthest)?;
        debug!(
            "stack_region of {} position(s), {} cop(ies) every {} block(s)",
            region.volume(),
            count,
            extent
        );

        Ok(self.perform("stack", |w| {
            let mut contents = Vec::with_capacity(region.volume());
            for pos in region.iter() {
                contents.push((pos, w.get_block(pos)?));
            }

            for i in 1..=count as i32 {
                // Bounded by `furthest`, which was checked above.
                let offset = direction * (extent * i);
                for (pos, block) in &contents {
                    if !copy_air && block.is_air() {
                        continue;
                    }
                    w.set_block(*pos + offset, block)?;
                }
            }
            Ok(())
        }))
    }
}
