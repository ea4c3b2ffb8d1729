pub mod picker;
pub mod status_bar;
