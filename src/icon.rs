//! Network icon resolution.
//!
//! An icon starts at the remote icon repository, falls back to the bundled
//! icon on the first load failure and to a text badge on the second. The
//! progression only moves forward; a failed remote is never retried.

use crate::config::HelperConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the icon is currently being loaded from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconSource {
    #[default]
    Remote,
    Local,
    Placeholder,
}

impl IconSource {
    /// Next source after the current one failed to load.
    pub fn on_load_error(self) -> Self {
        match self {
            Self::Remote => Self::Local,
            Self::Local | Self::Placeholder => Self::Placeholder,
        }
    }
}

/// What the renderer should draw for an icon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconView {
    Image { src: String, alt: String, size: u32 },
    Placeholder { label: String, size: u32 },
}

/// Icon state for one chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkIcon {
    name: String,
    source: IconSource,
}

impl NetworkIcon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: IconSource::Remote,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> IconSource {
        self.source
    }

    /// Record a load failure of the current image.
    pub fn on_load_error(&mut self) {
        let next = self.source.on_load_error();
        debug!(name = %self.name, from = ?self.source, to = ?next, "icon load failed");
        self.source = next;
    }

    /// URL to load in the current state, `None` once on the placeholder.
    pub fn src(&self, config: &HelperConfig) -> Option<String> {
        match self.source {
            IconSource::Remote => Some(config.remote_icon_url(&self.name)),
            IconSource::Local => Some(config.local_icon_url(&self.name)),
            IconSource::Placeholder => None,
        }
    }

    pub fn render(&self, config: &HelperConfig) -> IconView {
        match self.src(config) {
            Some(src) => IconView::Image {
                src,
                alt: self.name.clone(),
                size: config.icon_size,
            },
            None => IconView::Placeholder {
                label: placeholder_label(&self.name, config.placeholder_len),
                size: config.icon_size,
            },
        }
    }
}

/// Leading characters of `name`, uppercased.
pub fn placeholder_label(name: &str, len: usize) -> String {
    name.chars().take(len).collect::<String>().to_uppercase()
}
