//! Symbolic icon names used by tile types and add-ons.
//!
//! Map data stores icons as plain strings. They are resolved to an [`Icon`]
//! only when a scene is built for presentation.

#[cfg(test)]
#[path = "icon_test.rs"]
mod icon_test;

/// Icons the presentation layer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    TreePine,
    Waves,
    Mountain,
    Sun,
    Home,
    Castle,
    Route,
    /// Fallback for names the registry does not know.
    Hexagon,
}

const ALL: [Icon; 8] = [
    Icon::TreePine,
    Icon::Waves,
    Icon::Mountain,
    Icon::Sun,
    Icon::Home,
    Icon::Castle,
    Icon::Route,
    Icon::Hexagon,
];

impl Icon {
    /// Resolve a stored icon name. Unknown names map to [`Icon::Hexagon`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        ALL.into_iter().find(|icon| icon.name() == name).unwrap_or(Self::Hexagon)
    }

    /// The name this icon is stored under in map data.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TreePine => "TreePine",
            Self::Waves => "Waves",
            Self::Mountain => "Mountain",
            Self::Sun => "Sun",
            Self::Home => "Home",
            Self::Castle => "Castle",
            Self::Route => "Route",
            Self::Hexagon => "Hexagon",
        }
    }

    /// Asset reference the renderer loads for this icon.
    #[must_use]
    pub fn asset(self) -> &'static str {
        match self {
            Self::TreePine => "lucide/tree-pine.svg",
            Self::Waves => "lucide/waves.svg",
            Self::Mountain => "lucide/mountain.svg",
            Self::Sun => "lucide/sun.svg",
            Self::Home => "lucide/home.svg",
            Self::Castle => "lucide/castle.svg",
            Self::Route => "lucide/route.svg",
            Self::Hexagon => "lucide/hexagon.svg",
        }
    }
}
