//! Train colours and colour mixing.
//!
//! Red, Yellow and Blue are primaries. Each pair of distinct primaries mixes
//! to a secondary (Orange, Green, Purple). Any other combination turns Brown,
//! and Brown only ever mixes with itself.

use serde::{Deserialize, Serialize};

/// Colour of a train.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Blue,
    Orange,
    Purple,
    Green,
    Brown,
}

impl Color {
    /// All colours.
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Yellow,
        Color::Blue,
        Color::Orange,
        Color::Purple,
        Color::Green,
        Color::Brown,
    ];

    /// True for Red, Yellow and Blue.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Color::Red | Color::Yellow | Color::Blue)
    }

    /// Combine two colours, or `None` when the pair has no rule (Brown).
    fn combine(self, other: Color) -> Option<Color> {
        use Color::*;

        match (self, other) {
            (a, b) if a == b => Some(a),
            (Red, Blue) | (Blue, Red) => Some(Purple),
            (Red, Yellow) | (Yellow, Red) => Some(Orange),
            (Blue, Yellow) | (Yellow, Blue) => Some(Green),
            _ => None,
        }
    }
}

/// Mix a list of colours.
///
/// The last colour seeds the accumulator, the rest fold in front to back.
/// The first pair with no mixing rule locks the result to Brown. An empty
/// list is Brown.
///
/// ```
/// use railmix::core::{mix, Color};
///
/// assert_eq!(mix(&[Color::Red, Color::Blue]), Color::Purple);
/// assert_eq!(mix(&[Color::Red, Color::Green]), Color::Brown);
/// assert_eq!(mix(&[Color::Yellow, Color::Yellow]), Color::Yellow);
/// ```
#[must_use]
pub fn mix(colors: &[Color]) -> Color {
    let Some((&last, rest)) = colors.split_last() else {
        return Color::Brown;
    };

    let mut mixed = last;
    for &color in rest {
        match mixed.combine(color) {
            Some(next) => mixed = next,
            None => return Color::Brown,
        }
    }
    mixed
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_same_color() {
        for color in Color::ALL {
            assert_eq!(mix(&[color, color]), color);
        }
    }

    #[test]
    fn test_mix_primary_pairs() {
        assert_eq!(mix(&[Color::Red, Color::Blue]), Color::Purple);
        assert_eq!(mix(&[Color::Blue, Color::Red]), Color::Purple);
        assert_eq!(mix(&[Color::Red, Color::Yellow]), Color::Orange);
        assert_eq!(mix(&[Color::Yellow, Color::Red]), Color::Orange);
        assert_eq!(mix(&[Color::Blue, Color::Yellow]), Color::Green);
        assert_eq!(mix(&[Color::Yellow, Color::Blue]), Color::Green);
    }

    #[test]
    fn test_mix_other_pairs_brown() {
        assert_eq!(mix(&[Color::Red, Color::Green]), Color::Brown);
        assert_eq!(mix(&[Color::Purple, Color::Orange]), Color::Brown);
        assert_eq!(mix(&[Color::Brown, Color::Red]), Color::Brown);
    }

    #[test]
    fn test_mix_pair_is_order_independent() {
        for a in Color::ALL {
            for b in Color::ALL {
                assert_eq!(mix(&[a, b]), mix(&[b, a]));
            }
        }
    }

    #[test]
    fn test_mix_three_colors() {
        // Seed Blue, fold Red -> Purple, fold Yellow -> no rule
        assert_eq!(mix(&[Color::Red, Color::Yellow, Color::Blue]), Color::Brown);
        // Seed Red, fold Red, fold Blue -> Purple
        assert_eq!(mix(&[Color::Red, Color::Blue, Color::Red]), Color::Purple);
        assert_eq!(mix(&[Color::Green, Color::Red, Color::Red]), Color::Brown);
    }

    #[test]
    fn test_mix_single_and_empty() {
        assert_eq!(mix(&[Color::Orange]), Color::Orange);
        assert_eq!(mix(&[]), Color::Brown);
    }

    #[test]
    fn test_is_primary() {
        assert!(Color::Red.is_primary());
        assert!(!Color::Purple.is_primary());
        assert!(!Color::Brown.is_primary());
    }
}
