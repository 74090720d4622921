//! Visual theme and styling for reports.

use console::Style;

/// Styles for report status cells and banners.
#[derive(Debug, Clone)]
pub struct StaircaseTheme {
    /// Style for PASS (green).
    pub passed: Style,
    /// Style for FAIL and failure details (red bold).
    pub failed: Style,
    /// Style for SKIP (orange).
    pub skipped: Style,
    /// Style for not-yet-run and preview cells (dim).
    pub pending: Style,
    /// Style for banners (bold).
    pub header: Style,
    /// Style for substep numbering and separators (dim).
    pub dim: Style,
}

impl Default for StaircaseTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl StaircaseTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            passed: Style::new().green(),
            failed: Style::new().red().bold(),
            skipped: Style::new().color256(208),
            pending: Style::new().dim(),
            header: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            passed: Style::new(),
            failed: Style::new(),
            skipped: Style::new(),
            pending: Style::new(),
            header: Style::new(),
            dim: Style::new(),
        }
    }

    /// Colored theme when colors are wanted, plain otherwise.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
