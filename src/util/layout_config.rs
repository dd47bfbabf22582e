//! Layout constants for the terminal views.

/// Sizes of the panes around the contour plot.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Height of the console pane, borders included.
    pub console_height: u16,
    /// Width reserved left of the plot for y-axis labels.
    pub y_label_width: u16,
    /// Rows reserved below the plot for x-axis labels.
    pub x_label_height: u16,
    /// Rows reserved above the plot for the colour bar or level legend.
    pub legend_height: u16,
    /// Width of the profile pane, percent of the plot row.
    pub profile_width_percent: u16,
    /// Number of tick labels on each profile axis.
    pub profile_ticks: usize,
    /// Dashes per unit length when drawing dotted lines on the canvas.
    pub dash_density: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            console_height: 8,
            y_label_width: 9,
            x_label_height: 1,
            legend_height: 1,
            profile_width_percent: 45,
            profile_ticks: 5,
            dash_density: 30.0,
        }
    }
}
