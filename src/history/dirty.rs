/// Minimum raster work the next frame must do.
///
/// Levels only rise between frames and are reset once the render loop
/// consumes them. A level is a lower bound on the work, not an exact diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DirtyLevel {
    /// Nothing changed in the raster.
    #[default]
    None,
    /// Only the overlay holding the pending edit needs redrawing.
    PendingEdit,
    /// Draw the newest committed edit on top of the committed buffer.
    LastEdit,
    /// Clear the committed buffer and replay every committed edit.
    AllEdits,
}

impl DirtyLevel {
    pub fn needs_overlay(self) -> bool {
        self >= DirtyLevel::PendingEdit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(DirtyLevel::None < DirtyLevel::PendingEdit);
        assert!(DirtyLevel::PendingEdit < DirtyLevel::LastEdit);
        assert!(DirtyLevel::LastEdit < DirtyLevel::AllEdits);
        assert_eq!(DirtyLevel::LastEdit.max(DirtyLevel::PendingEdit), DirtyLevel::LastEdit);
        assert!(!DirtyLevel::None.needs_overlay());
    }
}
