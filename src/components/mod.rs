pub mod controls;
pub mod error_banner;
pub mod image_gallery;
pub mod severity_legend;
pub mod stats_panel;
