//! Window attributes from configuration

use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

use crate::config::WindowConfig;

/// Creates window attributes from configuration
///
/// The window starts hidden and is shown once the renderer and textures are
/// ready, so a slow startup never shows an empty frame.
pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    let size = LogicalSize::new(config.width, config.height);
    let mut attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(size)
        .with_resizable(config.resizable)
        .with_decorations(config.decorated)
        .with_visible(false);

    if !config.resizable {
        attrs = attrs.with_min_inner_size(size).with_max_inner_size(size);
    }

    if config.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    attrs
}
