mod elements_panel;
mod properties_panel;
mod timeline_panel;

pub use elements_panel::elements_panel;
pub use properties_panel::properties_panel;
pub use timeline_panel::timeline_panel;
