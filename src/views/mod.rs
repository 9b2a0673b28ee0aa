pub mod map_container;
pub mod popup;
pub mod site_chrome;

pub use map_container::{render_photo_attribution, render_shell, ShellView};
pub use popup::render_popup;
pub use site_chrome::{render_footer, render_header};
