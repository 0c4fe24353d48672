//! Render states for a single widget instance.
//!
//! Each refresh walks `Loading -> Rendered | Empty | Error`; the final state
//! is terminal until the next refresh request for that instance.

/// Fully computed content for one rendered widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub title: String,
    /// Progress in percent, 0-100.
    pub percent: u8,
    /// Days-left label, e.g. "12d left" or "done".
    pub days_left: String,
    /// Window end, formatted DD.MM.YY.
    pub end_date: String,
    /// Packed ARGB background color.
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState {
    Loading,
    Rendered(WidgetView),
    /// No binding, or the bound item no longer exists.
    Empty,
    /// Render failed; isolated to this instance.
    Error,
}

impl WidgetState {
    pub fn label(&self) -> &'static str {
        match self {
            WidgetState::Loading => "loading",
            WidgetState::Rendered(_) => "rendered",
            WidgetState::Empty => "empty",
            WidgetState::Error => "error",
        }
    }
}
