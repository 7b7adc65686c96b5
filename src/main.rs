//! Galleria demo binary: open a window with a gallery, optionally
//! configured from a TOML file given as the first argument.

use std::path::Path;

use galleria::config::{GalleryConfig, MediaEntry};
use galleria::error::GalleriaError;
use galleria::viewer::Viewer;

/// Placeholder planes with labels: enough to see the loop, the bend,
/// and the snap without any image files on disk.
fn demo_config() -> GalleryConfig {
    let labels = [
        "Aurora", "Basalt", "Cinder", "Dune", "Ember", "Fjord", "Glacier",
    ];
    GalleryConfig {
        items: labels
            .iter()
            .map(|label| MediaEntry {
                image: None,
                label: (*label).to_owned(),
            })
            .collect(),
        ..Default::default()
    }
}

fn main() -> Result<(), GalleriaError> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => GalleryConfig::load(Path::new(&path))?,
        None => demo_config(),
    };

    Viewer::builder().with_config(config).build().run()
}
