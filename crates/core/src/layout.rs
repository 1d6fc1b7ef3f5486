//! Spatial mapping from planogram grid cells to image coordinates.
//!
//! The vision service reports anomalies as (tray, slot) grid cells. For the
//! on-image overlay these are converted to percentages of the image size:
//! the slot index gives the horizontal position, the tray gives one of three
//! fixed vertical band centers.

use crate::error::CoreError;

/// Default number of slots per tray (standard display unit).
pub const DEFAULT_SLOTS_PER_TRAY: u32 = 23;

/// Number of consecutive trays covered by one analysis run.
pub const TRAYS_PER_GROUP: u32 = 3;

/// Vertical band centers (percent of image height) for the three trays of a
/// group, top to bottom.
pub const TRAY_BAND_CENTERS: [f64; TRAYS_PER_GROUP as usize] = [17.0, 50.0, 83.0];

/// Geometry of a shelf as described by its planogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfLayout {
    /// Number of product slots per tray. Comes from the planogram row, not
    /// a constant; 23 is only the default for new planograms.
    pub slots_per_tray: u32,
}

impl Default for ShelfLayout {
    fn default() -> Self {
        Self {
            slots_per_tray: DEFAULT_SLOTS_PER_TRAY,
        }
    }
}

impl ShelfLayout {
    /// Create a layout, rejecting a zero slot count.
    pub fn new(slots_per_tray: u32) -> Result<Self, CoreError> {
        if slots_per_tray == 0 {
            return Err(CoreError::Validation(
                "slots_per_tray must be at least 1".into(),
            ));
        }
        Ok(Self { slots_per_tray })
    }

    /// Horizontal overlay position for a slot, as a percentage in `(0, 100]`.
    ///
    /// Slot indices are 1-based. Index 0 or an index beyond the tray's slot
    /// count is out of range.
    pub fn x_percent(&self, slot_index: u32) -> Result<f64, CoreError> {
        if slot_index == 0 || slot_index > self.slots_per_tray {
            return Err(CoreError::OutOfRange(format!(
                "slot index {slot_index} outside [1, {}]",
                self.slots_per_tray
            )));
        }
        Ok(f64::from(slot_index) / f64::from(self.slots_per_tray) * 100.0)
    }
}

/// A band of [`TRAYS_PER_GROUP`] consecutive trays under analysis.
///
/// Tray indices are 1-based and global to the shelf; the group maps its three
/// trays onto [`TRAY_BAND_CENTERS`] top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrayGroup {
    first_tray: u32,
}

impl TrayGroup {
    /// Create a group starting at the given tray (1-based).
    pub fn new(first_tray: u32) -> Result<Self, CoreError> {
        if first_tray == 0 {
            return Err(CoreError::Validation("tray indices are 1-based".into()));
        }
        Ok(Self { first_tray })
    }

    /// First tray index covered by this group.
    pub fn first_tray(&self) -> u32 {
        self.first_tray
    }

    /// Whether the given tray falls inside this group.
    pub fn contains(&self, tray_index: u32) -> bool {
        tray_index >= self.first_tray && tray_index < self.first_tray + TRAYS_PER_GROUP
    }

    /// Vertical band center (percent of image height) for a tray.
    ///
    /// A tray outside the group has no defined band and is rejected rather
    /// than mapped to a default.
    pub fn y_percent(&self, tray_index: u32) -> Result<f64, CoreError> {
        if !self.contains(tray_index) {
            return Err(CoreError::OutOfRange(format!(
                "tray index {tray_index} outside active group [{}, {}]",
                self.first_tray,
                self.first_tray + TRAYS_PER_GROUP - 1
            )));
        }
        Ok(TRAY_BAND_CENTERS[(tray_index - self.first_tray) as usize])
    }
}

/// Map a (tray, slot) grid cell to `(x_percent, y_percent)` overlay
/// coordinates within the image.
pub fn map_point(
    layout: &ShelfLayout,
    group: &TrayGroup,
    tray_index: u32,
    slot_index: u32,
) -> Result<(f64, f64), CoreError> {
    let y = group.y_percent(tray_index)?;
    let x = layout.x_percent(slot_index)?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_group() -> TrayGroup {
        TrayGroup::new(1).unwrap()
    }

    // -- x_percent ------------------------------------------------------------

    #[test]
    fn x_percent_covers_open_interval() {
        let layout = ShelfLayout::default();
        for slot in 1..=layout.slots_per_tray {
            let x = layout.x_percent(slot).unwrap();
            assert!(x > 0.0 && x <= 100.0, "slot {slot} mapped to {x}");
        }
    }

    #[test]
    fn x_percent_last_slot_is_100() {
        let layout = ShelfLayout::default();
        let x = layout.x_percent(23).unwrap();
        assert!((x - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn x_percent_respects_configured_slot_count() {
        let layout = ShelfLayout::new(10).unwrap();
        let x = layout.x_percent(5).unwrap();
        assert!((x - 50.0).abs() < f64::EPSILON);
        assert!(layout.x_percent(11).is_err());
    }

    #[test]
    fn slot_zero_out_of_range() {
        let layout = ShelfLayout::default();
        assert!(matches!(
            layout.x_percent(0),
            Err(CoreError::OutOfRange(_))
        ));
    }

    #[test]
    fn slot_beyond_tray_out_of_range() {
        let layout = ShelfLayout::default();
        assert!(matches!(
            layout.x_percent(24),
            Err(CoreError::OutOfRange(_))
        ));
    }

    // -- tray bands -----------------------------------------------------------

    #[test]
    fn trays_map_to_fixed_band_centers() {
        let group = default_group();
        assert!((group.y_percent(1).unwrap() - 17.0).abs() < f64::EPSILON);
        assert!((group.y_percent(2).unwrap() - 50.0).abs() < f64::EPSILON);
        assert!((group.y_percent(3).unwrap() - 83.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tray_outside_group_out_of_range() {
        let group = default_group();
        for tray in [0u32, 4, 5, 100] {
            assert!(
                matches!(group.y_percent(tray), Err(CoreError::OutOfRange(_))),
                "tray {tray} should be out of range"
            );
        }
    }

    #[test]
    fn group_can_start_above_one() {
        let group = TrayGroup::new(4).unwrap();
        assert!(group.contains(4) && group.contains(6));
        assert!(!group.contains(3) && !group.contains(7));
        assert!((group.y_percent(4).unwrap() - 17.0).abs() < f64::EPSILON);
    }

    // -- map_point ------------------------------------------------------------

    #[test]
    fn map_point_combines_both_axes() {
        let layout = ShelfLayout::default();
        let group = default_group();
        let (x, y) = map_point(&layout, &group, 2, 5).unwrap();
        assert!((y - 50.0).abs() < f64::EPSILON);
        assert!((x - (5.0 / 23.0 * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_slot_layout_rejected() {
        assert!(ShelfLayout::new(0).is_err());
    }
}
