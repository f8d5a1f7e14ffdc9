//! Color tokens
//!
//! Content entries name their accent color with a utility-class token such as
//! `bg-lime-300` or `text-purple-500`. The motion layer only needs the RGBA
//! value (cursor fill, card accents), so tokens are resolved against a fixed
//! palette. Unknown tokens fall back to a default instead of failing.

use serde::Serialize;

/// RGBA color, components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

const PALETTE: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xffffff),
    ("lime-300", 0xbef264),
    ("lime-400", 0xa3e635),
    ("lime-500", 0x84cc16),
    ("purple-300", 0xd8b4fe),
    ("purple-500", 0xa855f7),
    ("purple-600", 0x9333ea),
    ("pink-300", 0xf9a8d4),
    ("pink-500", 0xec4899),
];

/// Look up a token, ignoring a `bg-`/`text-` prefix
pub fn lookup(token: &str) -> Option<Rgba> {
    let name = token
        .trim()
        .strip_prefix("bg-")
        .or_else(|| token.trim().strip_prefix("text-"))
        .unwrap_or(token.trim());
    PALETTE
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, hex)| Rgba::from_hex(*hex))
}

/// Resolve a token, falling back to `fallback` with a warning
pub fn resolve(token: &str, fallback: Rgba) -> Rgba {
    match lookup(token) {
        Some(color) => color,
        None => {
            tracing::warn!(token, "unknown color token, using default");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_ignored() {
        assert_eq!(lookup("bg-lime-400"), lookup("text-lime-400"));
        assert_eq!(lookup("bg-black"), Some(Rgba::BLACK));
        assert_eq!(lookup("white"), Some(Rgba::WHITE));
    }

    #[test]
    fn test_from_hex() {
        let pink = Rgba::from_hex(0xec4899);
        assert!((pink.r - 236.0 / 255.0).abs() < 1e-6);
        assert_eq!(pink.a, 1.0);
    }

    #[test]
    fn test_unknown_token_falls_back() {
        assert_eq!(lookup("bg-chartreuse-900"), None);
        assert_eq!(resolve("bg-chartreuse-900", Rgba::WHITE), Rgba::WHITE);
        assert_eq!(resolve("", Rgba::BLACK), Rgba::BLACK);
    }
}
