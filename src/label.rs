//! Score bands and their display colors.

/// Display classification of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub label: &'static str,
    /// CSS hex color, `#rrggbb`.
    pub color: &'static str,
}

/// Bands from highest to lowest: (lower bound, label, color).
/// A score equal to a lower bound belongs to that band.
const BANDS: [(f64, &str, &str); 4] = [
    (8.0, "Excellent", "#16a34a"),
    (6.0, "Good", "#22c55e"),
    (4.0, "Average", "#eab308"),
    (2.0, "Below Average", "#f59e0b"),
];

const POOR: Label = Label {
    label: "Poor",
    color: "#ef4444",
};

pub fn label_for(score: f64) -> Label {
    BANDS
        .iter()
        .find(|(min, _, _)| score >= *min)
        .map_or(POOR, |&(_, label, color)| Label { label, color })
}

impl Label {
    /// Color as an RGB triple, for terminal truecolor output.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.color.trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(0)
        };
        (channel(0), channel(2), channel(4))
    }
}
