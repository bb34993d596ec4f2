//! The edit/preview mode switch.

/// Which of the two overlapping panes is active.
///
/// There is no setter: the only way to change the mode is [`EditType::toggled`],
/// so a value is always exactly one of the two variants.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditType {
    /// The markdown source is editable and frontmost.
    #[default]
    Text,
    /// The rendered preview is frontmost.
    Preview,
}

impl EditType {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Text => Self::Preview,
            Self::Preview => Self::Text,
        }
    }

    /// Row index into the two-entry lookup tables keyed by mode.
    pub const fn index(self) -> usize {
        match self {
            Self::Text => 0,
            Self::Preview => 1,
        }
    }

    /// Short label shown next to the toggle control.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Preview => "preview",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_mode_is_text() {
        assert_eq!(EditType::default(), EditType::Text);
    }

    #[test]
    fn test_toggle_flips_text_to_preview() {
        assert_eq!(EditType::Text.toggled(), EditType::Preview);
    }

    #[test]
    fn test_toggle_flips_preview_to_text() {
        assert_eq!(EditType::Preview.toggled(), EditType::Text);
    }

    #[test]
    fn test_index_is_distinct_per_mode() {
        assert_eq!(EditType::Text.index(), 0);
        assert_eq!(EditType::Preview.index(), 1);
    }

    fn any_mode() -> impl Strategy<Value = EditType> {
        prop_oneof![Just(EditType::Text), Just(EditType::Preview)]
    }

    proptest! {
        #[test]
        fn toggle_is_an_involution(mode in any_mode()) {
            prop_assert_eq!(mode.toggled().toggled(), mode);
        }

        #[test]
        fn toggle_always_changes_mode(mode in any_mode()) {
            prop_assert_ne!(mode.toggled(), mode);
        }

        #[test]
        fn toggle_parity_matches_count(count in 0..64usize) {
            let mut mode = EditType::default();
            for _ in 0..count {
                mode = mode.toggled();
            }
            let expected = if count % 2 == 0 { EditType::Text } else { EditType::Preview };
            prop_assert_eq!(mode, expected);
        }
    }
}
