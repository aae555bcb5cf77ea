/// Easing curves mapping raw morph progress onto eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity curve.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out, the default diagram morph curve.
    #[default]
    InOutCubic,
}

impl Ease {
    /// Every supported curve.
    pub const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    /// Apply the curve to raw progress `p`, clamped into `[0, 1]`.
    pub fn apply(self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Self::Linear => p,
            Self::InQuad => p * p,
            Self::OutQuad => 1.0 - (1.0 - p) * (1.0 - p),
            Self::InOutQuad => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    1.0 - ((-2.0 * p + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => p * p * p,
            Self::OutCubic => 1.0 - (1.0 - p).powi(3),
            Self::InOutCubic => {
                if p < 0.5 {
                    4.0 * p * p * p
                } else {
                    1.0 - ((-2.0 * p + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
