// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::clamp::EdgeReach;

bitflags::bitflags! {
    /// Pan directions the zoom surface is willing to consume.
    ///
    /// Directions that are *not* set are left to sibling gestures, such as
    /// swiping to the neighbouring item or pulling down to dismiss.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PanDirection: u8 {
        /// Content may move left.
        const LEFT   = 0b0000_0001;
        /// Content may move right.
        const RIGHT  = 0b0000_0010;
        /// Content may move up.
        const UP     = 0b0000_0100;
        /// Content may move down.
        const DOWN   = 0b0000_1000;
        /// Both horizontal directions.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Both vertical directions.
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
        /// Every direction.
        const ALL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl Default for PanDirection {
    fn default() -> Self {
        Self::VERTICAL
    }
}

impl PanDirection {
    /// Derives the permitted directions from zoom and edge state.
    ///
    /// When the content is not enlarged only vertical panning is kept, handing
    /// horizontal swipes to the sibling navigation gesture. When enlarged, a
    /// horizontal direction is kept for as long as the content can still move
    /// that way.
    #[must_use]
    pub fn from_reach(enlarged: bool, reach: EdgeReach) -> Self {
        if !enlarged {
            return Self::VERTICAL;
        }
        match (reach.left, reach.right) {
            (false, false) => Self::ALL,
            (false, true) => Self::VERTICAL | Self::RIGHT,
            (true, false) => Self::VERTICAL | Self::LEFT,
            (true, true) => Self::VERTICAL,
        }
    }

    /// Whether the sibling swipe gesture must be disabled.
    ///
    /// Swiping is only disabled while the content consumes every direction.
    #[must_use]
    pub fn disables_swipe(self) -> bool {
        self == Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::PanDirection;
    use crate::clamp::EdgeReach;

    fn reach(left: bool, right: bool) -> EdgeReach {
        EdgeReach {
            left,
            right,
            ..EdgeReach::default()
        }
    }

    #[test]
    fn not_enlarged_is_vertical_only() {
        for (l, r) in [(true, true), (false, false), (true, false), (false, true)] {
            assert_eq!(
                PanDirection::from_reach(false, reach(l, r)),
                PanDirection::VERTICAL
            );
        }
    }

    #[test]
    fn enlarged_table() {
        assert_eq!(
            PanDirection::from_reach(true, reach(false, false)),
            PanDirection::ALL
        );
        assert_eq!(
            PanDirection::from_reach(true, reach(false, true)),
            PanDirection::VERTICAL | PanDirection::RIGHT
        );
        assert_eq!(
            PanDirection::from_reach(true, reach(true, false)),
            PanDirection::VERTICAL | PanDirection::LEFT
        );
        assert_eq!(
            PanDirection::from_reach(true, reach(true, true)),
            PanDirection::VERTICAL
        );
    }

    #[test]
    fn only_all_disables_swipe() {
        assert!(PanDirection::ALL.disables_swipe());
        assert!(!(PanDirection::VERTICAL | PanDirection::LEFT).disables_swipe());
        assert!(!PanDirection::VERTICAL.disables_swipe());
    }
}
