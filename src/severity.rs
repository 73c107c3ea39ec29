//! Severity tiers derived from the number of deaths a region reported today.

use ratatui::style::Color;

/// Deaths reported today at or above which a region is `Red`.
pub const RED_THRESHOLD: u64 = 60;
/// Deaths reported today at or above which a region is `Yellow`.
pub const YELLOW_THRESHOLD: u64 = 30;

/// Severity tier of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// No summary entry, or the entry has no `todayDeaths`
    NoData,
    Green,
    Yellow,
    Red,
}

impl Severity {
    /// All tiers in drawing order (back to front)
    pub const ALL: [Severity; 4] = [
        Severity::NoData,
        Severity::Green,
        Severity::Yellow,
        Severity::Red,
    ];

    /// Shape fill color on the map
    pub fn fill_color(self) -> Color {
        match self {
            Severity::NoData => Color::DarkGray,
            Severity::Green => Color::Green,
            Severity::Yellow => Color::Yellow,
            Severity::Red => Color::Red,
        }
    }

    /// Frame accent color for the selected region
    pub fn accent_color(self) -> Color {
        match self {
            Severity::NoData => Color::Gray,
            Severity::Green => Color::LightGreen,
            Severity::Yellow => Color::LightYellow,
            Severity::Red => Color::LightRed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::NoData => "no data",
            Severity::Green => "low",
            Severity::Yellow => "elevated",
            Severity::Red => "high",
        }
    }

    /// Index into per-tier layer arrays
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Severity::NoData => 0,
            Severity::Green => 1,
            Severity::Yellow => 2,
            Severity::Red => 3,
        }
    }
}

/// Classify a region by deaths reported today.
/// Boundaries belong to the higher tier: 30 is `Yellow`, 60 is `Red`.
pub fn classify(today_deaths: Option<u64>) -> Severity {
    match today_deaths {
        None => Severity::NoData,
        Some(d) if d >= RED_THRESHOLD => Severity::Red,
        Some(d) if d >= YELLOW_THRESHOLD => Severity::Yellow,
        Some(_) => Severity::Green,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        for d in 0..30 {
            assert_eq!(classify(Some(d)), Severity::Green, "d = {d}");
        }
        for d in 30..60 {
            assert_eq!(classify(Some(d)), Severity::Yellow, "d = {d}");
        }
        for d in [60, 61, 100, 5_000, u64::MAX] {
            assert_eq!(classify(Some(d)), Severity::Red, "d = {d}");
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(Some(29)), Severity::Green);
        assert_eq!(classify(Some(30)), Severity::Yellow);
        assert_eq!(classify(Some(59)), Severity::Yellow);
        assert_eq!(classify(Some(60)), Severity::Red);
    }

    #[test]
    fn test_missing_is_explicit() {
        assert_eq!(classify(None), Severity::NoData);
        assert_ne!(classify(None), classify(Some(0)));
    }

    #[test]
    fn test_fill_and_accent_agree_on_tier() {
        // Distinct tiers must never share a fill or an accent color
        for a in Severity::ALL {
            for b in Severity::ALL {
                if a != b {
                    assert_ne!(a.fill_color(), b.fill_color());
                    assert_ne!(a.accent_color(), b.accent_color());
                }
            }
        }
    }

    #[test]
    fn test_index_matches_order() {
        for (i, tier) in Severity::ALL.iter().enumerate() {
            assert_eq!(tier.index(), i);
        }
    }
}
