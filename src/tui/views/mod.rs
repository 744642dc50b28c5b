mod breakdown;
mod help;
mod scatter;
mod story;
mod summary;
mod tooltip;

pub use breakdown::draw_breakdown_view;
pub use help::draw_help_overlay;
pub use scatter::{draw_scatter_view, hit_test, plot_position, recompute_selection, scales};
pub use story::{draw_story_view, narration};
pub use summary::draw_summary_view;
pub use tooltip::draw_tooltip;
