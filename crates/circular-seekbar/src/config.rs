use crate::geometry::Insets;
use crate::style::{Color, StatefulColor, Theme, ThumbVisual};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

/// How a raw touch angle becomes the animated progress angle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    /// Follow the finger smoothly.
    #[default]
    #[strum(to_string = "drift", serialize = "0")]
    Drift,
    /// Animate toward the nearest step.
    #[strum(to_string = "gravity", serialize = "1")]
    Gravity,
    /// Jump to the nearest step.
    #[strum(to_string = "snap", serialize = "2")]
    Snap,
}

/// What a touch in the gap between the end and the start of the arc does.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Pin to whichever end of the arc is closer across the gap.
    #[default]
    #[strum(to_string = "split")]
    Split,
    /// Ignore the touch unless it lands on the thumb or an end of the arc.
    #[strum(to_string = "reject")]
    Reject,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ProgressColorConfig {
    Single(Color),
    States {
        pressed: Option<Color>,
        disabled: Option<Color>,
        default: Color,
    },
}

impl From<ProgressColorConfig> for StatefulColor {
    fn from(config: ProgressColorConfig) -> Self {
        match config {
            ProgressColorConfig::Single(color) => StatefulColor::single(color),
            ProgressColorConfig::States {
                pressed,
                disabled,
                default,
            } => StatefulColor {
                pressed,
                disabled,
                default,
            },
        }
    }
}

/// Declarative settings for a [`CircularSeekBar`](crate::CircularSeekBar).
/// Lengths are in dp and scaled by the host's density.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SeekBarConfig {
    pub min: i32,
    pub max: i32,
    pub progress: i32,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub stroke_width: f64,
    pub sweep_color: Option<Color>,
    pub progress_color: Option<ProgressColorConfig>,
    pub thumb: ThumbVisual,
    pub thumb_radius: f64,
    pub scroll_mode: ScrollMode,
    pub gap_policy: GapPolicy,
    pub touch_inside: bool,
    pub enabled: bool,
    pub padding: Insets,
}

impl Default for SeekBarConfig {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            progress: 0,
            start_angle: 90.0,
            sweep_angle: 359.9,
            stroke_width: 14.0,
            sweep_color: None,
            progress_color: None,
            thumb: ThumbVisual::Default,
            thumb_radius: 12.0,
            scroll_mode: ScrollMode::Drift,
            gap_policy: GapPolicy::Split,
            touch_inside: true,
            enabled: true,
            padding: Insets::default(),
        }
    }
}

impl SeekBarConfig {
    pub fn sweep_color_or(&self, theme: &Theme) -> Color {
        self.sweep_color.unwrap_or_else(|| theme.sweep_color())
    }

    pub fn progress_color_or(&self, theme: &Theme) -> StatefulColor {
        self.progress_color
            .clone()
            .map(StatefulColor::from)
            .unwrap_or_else(|| theme.progress_color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_mode_deserialization() {
        let cases = vec![
            ("\"drift\"", ScrollMode::Drift),
            ("\"Drift\"", ScrollMode::Drift),
            ("\"GRAVITY\"", ScrollMode::Gravity),
            ("\"snap\"", ScrollMode::Snap),
            ("\"0\"", ScrollMode::Drift),
            ("\"2\"", ScrollMode::Snap),
        ];

        for (json, expected) in cases {
            let deserialized: ScrollMode = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<ScrollMode>("\"spring\"").is_err());
    }

    #[test]
    fn test_modes_display_lowercase() {
        assert_eq!(ScrollMode::Gravity.to_string(), "gravity");
        assert_eq!(GapPolicy::Reject.to_string(), "reject");
        assert_eq!(serde_json::to_string(&ScrollMode::Snap).unwrap(), "\"snap\"");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: SeekBarConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SeekBarConfig::default());
        assert_eq!(config.sweep_angle, 359.9);
        assert!(config.touch_inside);
    }

    #[test]
    fn test_progress_color_forms() {
        let single: SeekBarConfig =
            serde_json::from_str(r##"{ "progress_color": "#FF0000" }"##).unwrap();
        assert_eq!(
            single.progress_color,
            Some(ProgressColorConfig::Single(Color::from_argb(0xFFFF_0000)))
        );

        let states: SeekBarConfig = serde_json::from_str(
            r##"{ "progress_color": { "pressed": "#00FF00", "default": "#0000FF" } }"##,
        )
        .unwrap();
        let color = states.progress_color_or(&Theme::default());
        assert_eq!(color.pressed, Some(Color::from_argb(0xFF00_FF00)));
        assert_eq!(color.disabled, None);
        assert_eq!(color.default, Color::from_argb(0xFF00_00FF));
    }

    #[test]
    fn test_theme_fills_missing_colors() {
        let theme = Theme::default();
        let config = SeekBarConfig::default();
        assert_eq!(config.sweep_color_or(&theme), theme.highlight);
        assert_eq!(config.progress_color_or(&theme), theme.progress_color());
    }

    #[test]
    fn test_full_config() {
        let json = r##"{
            "min": 10,
            "max": 20,
            "scroll_mode": "snap",
            "gap_policy": "reject",
            "touch_inside": false,
            "thumb": "none",
            "padding": { "start": 4.0, "top": 4.0 }
        }"##;
        let config: SeekBarConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.min, 10);
        assert_eq!(config.max, 20);
        assert_eq!(config.scroll_mode, ScrollMode::Snap);
        assert_eq!(config.gap_policy, GapPolicy::Reject);
        assert!(!config.touch_inside);
        assert_eq!(config.thumb, ThumbVisual::None);
        assert_eq!(config.padding, Insets::new(4.0, 4.0, 0.0, 0.0));
    }
}
