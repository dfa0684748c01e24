use serde::{Deserialize, Serialize};

/// Start and end colour of one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub start: String,
    pub end: String,
}

impl ColorPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Ordered branch colours. Branch `b` uses entry `b % len`.
///
/// Never empty: an empty list, including one read from a config file, gives
/// the default palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ColorPair>", into = "Vec<ColorPair>")]
pub struct Palette(Vec<ColorPair>);

const DEFAULT_PAIRS: [(&str, &str); 8] = [
    ("#ef4444", "#b91c1c"), // red
    ("#3b82f6", "#1d4ed8"), // blue
    ("#10b981", "#047857"), // emerald
    ("#8b5cf6", "#6d28d9"), // violet
    ("#f59e0b", "#b45309"), // amber
    ("#ec4899", "#be185d"), // pink
    ("#06b6d4", "#0e7490"), // cyan
    ("#f43f5e", "#be123c"), // rose
];

impl Default for Palette {
    fn default() -> Self {
        Self(
            DEFAULT_PAIRS
                .iter()
                .map(|&(start, end)| ColorPair::new(start, end))
                .collect(),
        )
    }
}

impl Palette {
    /// An empty list gives the default palette
    pub fn new(pairs: Vec<ColorPair>) -> Self {
        if pairs.is_empty() {
            Self::default()
        } else {
            Self(pairs)
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn for_branch(&self, branch: usize) -> &ColorPair {
        &self.0[branch % self.0.len()]
    }
}

impl From<Vec<ColorPair>> for Palette {
    fn from(pairs: Vec<ColorPair>) -> Self {
        Self::new(pairs)
    }
}

impl From<Palette> for Vec<ColorPair> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}
