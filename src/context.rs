//! Capabilities a host passes to every layout it constructs.
//!
//! Layouts never reach for global state: the logger and the optional theme
//! travel in a [`HostContext`] given at construction.  Cloning a context is
//! cheap and shares the underlying capabilities.

use crate::theme::DividerStyle;
use crate::traits::{LogLevel, Logger, ThemeProvider};
use std::fmt;
use std::rc::Rc;

/// Forwards diagnostics to the [`log`] facade under the `panegrid` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogForwarder;

impl Logger for LogForwarder {
    fn log(&self, level: LogLevel, message: &str) {
        let level = match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
        };
        log::log!(target: "panegrid", level, "{}", message);
    }
}

/// Drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// The logger and theme a layout was built with.
#[derive(Clone)]
pub struct HostContext {
    logger: Rc<dyn Logger>,
    theme: Option<Rc<dyn ThemeProvider>>,
}

impl HostContext {
    pub fn new(logger: Rc<dyn Logger>) -> Self {
        Self {
            logger,
            theme: None,
        }
    }

    pub fn with_theme(mut self, theme: Rc<dyn ThemeProvider>) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    pub fn theme(&self) -> Option<&dyn ThemeProvider> {
        self.theme.as_deref()
    }

    /// Divider colours from the theme, or the defaults.
    pub fn divider_style(&self) -> DividerStyle {
        DividerStyle::from_theme(self.theme())
    }
}

impl Default for HostContext {
    /// Logs through [`LogForwarder`], no theme.
    fn default() -> Self {
        Self::new(Rc::new(LogForwarder))
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostContext")
            .field("theme", &self.theme.is_some())
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Color, StaticTheme};

    #[test]
    fn context_without_theme_uses_default_style() {
        let ctx = HostContext::new(Rc::new(NullLogger));
        assert_eq!(ctx.divider_style(), DividerStyle::default());
    }

    #[test]
    fn context_with_theme_uses_its_colours() {
        let theme = StaticTheme::new(Some(Color::rgb(9, 9, 9)), Some(Color::rgb(1, 1, 1)));
        let ctx = HostContext::default().with_theme(Rc::new(theme));
        let style = ctx.divider_style();
        assert_eq!(style.color, Color::rgb(9, 9, 9));
        assert_eq!(style.hover_color, Color::rgb(1, 1, 1));
    }

    #[test]
    fn cloned_context_shares_logger() {
        let (ctx, logger) = testing::recording_context();
        let other = ctx.clone();
        other.logger().info("hello");
        assert_eq!(logger.lines.borrow().len(), 1);
    }
}
