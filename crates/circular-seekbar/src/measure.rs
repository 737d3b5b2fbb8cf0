use crate::geometry::Size;

/// Default edge length of the widget in dp.
pub const DEFAULT_SIZE_DP: f64 = 256.0;

/// Size constraint handed down by the host layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureSpec {
    Exactly(f64),
    AtMost(f64),
    Unspecified,
}

impl MeasureSpec {
    pub fn resolve(self, default_size: f64) -> f64 {
        match self {
            Self::Exactly(size) => size,
            Self::AtMost(size) => size.min(default_size),
            Self::Unspecified => default_size,
        }
    }
}

pub fn dp_to_px(dp: f64, density: f64) -> f64 {
    (dp * density + 0.5).floor()
}

pub fn measure(width: MeasureSpec, height: MeasureSpec, density: f64) -> Size {
    let default_size = dp_to_px(DEFAULT_SIZE_DP, density);
    Size::new(width.resolve(default_size), height.resolve(default_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_spec_rules() {
        assert_eq!(MeasureSpec::Exactly(400.0).resolve(256.0), 400.0);
        assert_eq!(MeasureSpec::AtMost(400.0).resolve(256.0), 256.0);
        assert_eq!(MeasureSpec::AtMost(100.0).resolve(256.0), 100.0);
        assert_eq!(MeasureSpec::Unspecified.resolve(256.0), 256.0);
    }

    #[test]
    fn test_default_size_follows_density() {
        let size = measure(MeasureSpec::Unspecified, MeasureSpec::Exactly(50.0), 1.5);
        assert_eq!(size, Size::new(384.0, 50.0));
    }

    #[test]
    fn test_dp_to_px_rounds() {
        assert_eq!(dp_to_px(1.0, 1.0), 1.0);
        assert_eq!(dp_to_px(1.0, 1.4), 1.0);
        assert_eq!(dp_to_px(1.0, 2.625), 3.0);
    }
}
