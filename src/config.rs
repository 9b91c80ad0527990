//! Application configuration.
//!
//! The configuration is loaded from a JSON file whose path is passed on the
//! command line (`--config <path>`) or found at
//! `$XDG_CONFIG_HOME/panegrid/config.json`.  Every section is optional and
//! unknown keys are ignored, so `{}` is a valid file.
//!
//! # Example
//!
//! ```json
//! {
//!   "layout": { "Grid": { "rows": 2, "columns": 3 } },
//!   "viewport": { "width": 2560.0, "height": 1440.0 },
//!   "grid": { "min_row_height": 80.0, "show_dividers": true },
//!   "tiling": { "master_ratio": 0.55 },
//!   "dock": { "default_extent": 240.0 },
//!   "theme": { "divider_color": "#3c3c3c", "divider_hover_color": "#007accff" }
//! }
//! ```

use crate::context::HostContext;
use crate::geometry::Size;
use crate::layout::dock::DockConfig;
use crate::layout::grid::GridConfig;
use crate::layout::tiling::TilingConfig;
use crate::layout::LayoutSpec;
use crate::theme::{StaticTheme, ThemeConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::rc::Rc;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The layout a new workspace starts with.
    #[serde(default)]
    pub layout: LayoutSpec,

    /// Container size used by the binary when arranging.
    #[serde(default = "default_viewport")]
    pub viewport: Size,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub tiling: TilingConfig,

    #[serde(default)]
    pub dock: DockConfig,

    /// Divider colours.  Missing colours use the built-in defaults.
    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_viewport() -> Size {
    Size::new(1920.0, 1080.0)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutSpec::default(),
            viewport: default_viewport(),
            grid: GridConfig::default(),
            tiling: TilingConfig::default(),
            dock: DockConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// A context that logs through the `log` facade and carries the
    /// configured theme, if it sets any colour.
    pub fn host_context(&self) -> HostContext {
        let ctx = HostContext::default();
        if self.theme.divider_color.is_none() && self.theme.divider_hover_color.is_none() {
            return ctx;
        }
        ctx.with_theme(Rc::new(StaticTheme::from(&self.theme)))
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Axis;
    use crate::layout::slots::SlotPreset;
    use crate::layout::tiling::TilingMode;
    use crate::theme::{Color, DividerStyle};

    #[test]
    fn deserialize_full_config() {
        let json = r##"{
            "layout": { "Stack": { "axis": "Horizontal" } },
            "viewport": { "width": 800.0, "height": 600.0 },
            "grid": {
                "min_row_height": 80.0,
                "min_column_width": 120.0,
                "show_dividers": false,
                "divider_thickness": 6.0
            },
            "tiling": { "master_ratio": 0.5, "divider_thickness": 2.0 },
            "dock": { "default_extent": 150.0 },
            "theme": { "divider_color": "#102030" }
        }"##;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.layout, LayoutSpec::Stack { axis: Axis::Horizontal });
        assert_eq!(cfg.viewport, Size::new(800.0, 600.0));
        assert_eq!(cfg.grid.min_row_height, 80.0);
        assert_eq!(cfg.grid.min_column_width, 120.0);
        assert!(!cfg.grid.show_dividers);
        assert_eq!(cfg.grid.divider_thickness, 6.0);
        assert_eq!(cfg.tiling.master_ratio, 0.5);
        assert_eq!(cfg.tiling.divider_thickness, 2.0);
        assert_eq!(cfg.dock.default_extent, 150.0);
        assert_eq!(cfg.theme.divider_color, Some(Color::rgb(0x10, 0x20, 0x30)));
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.layout, LayoutSpec::Tiling { mode: TilingMode::Auto });
        assert_eq!(cfg.viewport, Size::new(1920.0, 1080.0));
        let gd = GridConfig::default();
        assert_eq!(cfg.grid.min_row_height, gd.min_row_height);
        assert_eq!(cfg.grid.min_column_width, gd.min_column_width);
        assert_eq!(cfg.grid.show_dividers, gd.show_dividers);
        let td = TilingConfig::default();
        assert_eq!(cfg.tiling.master_ratio, td.master_ratio);
        assert_eq!(cfg.dock.default_extent, DockConfig::default().default_extent);
        assert_eq!(cfg.theme.divider_color, None);
    }

    #[test]
    fn deserialize_partial_grid() {
        let cfg: Config = serde_json::from_str(r#"{ "grid": { "min_row_height": 30.0 } }"#).unwrap();
        assert_eq!(cfg.grid.min_row_height, 30.0);
        assert_eq!(cfg.grid.min_column_width, GridConfig::default().min_column_width);
    }

    #[test]
    fn deserialize_slot_layout() {
        let cfg: Config = serde_json::from_str(r#"{ "layout": { "Slots": "Monitoring" } }"#).unwrap();
        assert_eq!(cfg.layout, LayoutSpec::Slots(SlotPreset::Monitoring));
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "grid": {}, "future_section": { "key": 42 } }"#;
        // Should not fail: unknown keys are silently ignored.
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn invalid_colour_is_rejected() {
        let json = r#"{ "theme": { "divider_color": "blue" } }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn host_context_carries_theme_only_when_set() {
        assert!(Config::default().host_context().theme().is_none());

        let cfg: Config =
            serde_json::from_str(r##"{ "theme": { "divider_hover_color": "#ff000080" } }"##).unwrap();
        let style = cfg.host_context().divider_style();
        assert_eq!(style.hover_color, Color { r: 255, g: 0, b: 0, a: 0x80 });
        assert_eq!(style.color, DividerStyle::default().color);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let err = Config::load(Path::new("/nonexistent/panegrid/config.json")).unwrap_err();
        assert!(err.to_string().starts_with("config error: failed to read"));
    }
}
