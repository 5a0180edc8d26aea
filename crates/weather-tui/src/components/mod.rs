pub mod channel_buttons;
pub mod header;
pub mod scene_panel;
pub mod volume_slider;
