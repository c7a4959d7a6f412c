//! Styling for terminal output.

use owo_colors::OwoColorize;

/// Theme for consistent styling
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub colors_enabled: bool,
}

impl Theme {
    /// Create a new theme
    pub const fn new(colors_enabled: bool) -> Self {
        Self { colors_enabled }
    }

    /// Create a theme from current settings
    pub fn from_env() -> Self {
        Self::new(crate::output::colors_enabled())
    }

    fn paint(&self, text: &str, style: owo_colors::Style) -> String {
        if self.colors_enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    /// Format a sublet name
    pub fn name(&self, name: &str) -> String {
        self.paint(name, owo_colors::Style::new().bold())
    }

    /// Format a version
    pub fn version(&self, version: &str) -> String {
        self.paint(version, owo_colors::Style::new().green())
    }

    /// Format a tag
    pub fn tag(&self, tag: &str) -> String {
        self.paint(&format!("#{tag}"), owo_colors::Style::new().magenta())
    }

    /// Format a contact address
    pub fn contact(&self, text: &str) -> String {
        self.paint(text, owo_colors::Style::new().cyan())
    }

    /// Format a default value
    pub fn value(&self, text: &str) -> String {
        self.paint(text, owo_colors::Style::new().yellow())
    }

    /// Format an error
    pub fn error(&self, text: &str) -> String {
        self.paint(text, owo_colors::Style::new().red().bold())
    }

    /// Format a warning
    pub fn warning(&self, text: &str) -> String {
        self.paint(text, owo_colors::Style::new().yellow().bold())
    }

    /// Format a header or label
    pub fn header(&self, text: &str) -> String {
        self.paint(text, owo_colors::Style::new().bold())
    }

    /// Format an inverted badge such as a listing index
    pub fn badge(&self, text: &str) -> String {
        if self.colors_enabled {
            text.reversed().to_string()
        } else {
            format!("({text})")
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_env()
    }
}
