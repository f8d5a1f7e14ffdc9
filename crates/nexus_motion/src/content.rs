//! Page content table
//!
//! Copy, links and color tokens for the page, as supplied by the content
//! provider. The motion layer reads it to size lists (menu entries, project
//! cards, skill cards, marquee phrases) and to resolve accent colors. Every
//! field has a default, and `ContentTable::default()` is the stock NEXUS page.

use crate::color::{self, Rgba};
use nexus_core::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The whole page's content
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentTable {
    pub navbar: Navbar,
    pub menu_items: Vec<String>,
    pub hero: Hero,
    pub marquee: Vec<MarqueePhrase>,
    pub about: About,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub footer: Footer,
}

impl ContentTable {
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    /// Title lines of the hero, top to bottom
    pub fn hero_lines(&self) -> [&str; 3] {
        [
            &self.hero.title_line1,
            &self.hero.title_line2,
            &self.hero.title_line3,
        ]
    }

    /// Accent color of project card `index`
    pub fn project_color(&self, index: usize) -> Rgba {
        accent(self.projects.get(index).and_then(|p| p.color.as_deref()))
    }

    /// Accent color of skill card `index`
    pub fn skill_color(&self, index: usize) -> Rgba {
        accent(self.skills.get(index).and_then(|s| s.color.as_deref()))
    }
}

fn accent(token: Option<&str>) -> Rgba {
    token
        .map(|token| color::resolve(token, Rgba::BLACK))
        .unwrap_or_default()
}

impl Default for ContentTable {
    fn default() -> Self {
        Self {
            navbar: Navbar::default(),
            menu_items: ["Start Game", "Inventory", "Skill Tree", "Lore", "Contact"]
                .into_iter()
                .map(String::from)
                .collect(),
            hero: Hero::default(),
            marquee: vec![
                MarqueePhrase::new("User Interface", "text-lime-400"),
                MarqueePhrase::new("Game Feel", "text-purple-500"),
                MarqueePhrase::new("Motion Design", "text-lime-400"),
            ],
            about: About::default(),
            projects: vec![
                Project::new("Neon Racer UI", "Game HUD / Interface", "bg-purple-600"),
                Project::new("Cyber Deck", "Web App / React", "bg-lime-500"),
                Project::new("Void Walker", "3D Experience / Three.js", "bg-black"),
                Project::new("Glitch Shop", "E-commerce / Brutalism", "bg-pink-500"),
            ],
            skills: vec![
                Skill::new("Dev Magic", "React, Three.js, WebGL Shaders", "bg-lime-300", "code"),
                Skill::new(
                    "UI Architecture",
                    "Figma, Design Systems, Brutalism",
                    "bg-purple-300",
                    "layers",
                ),
                Skill::new("Game Juice", "GSAP, Framer Motion, Unity", "bg-pink-300", "zap"),
            ],
            footer: Footer::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Navbar {
    pub logo_text: String,
    pub logo_accent: String,
    pub menu_text: String,
}

impl Default for Navbar {
    fn default() -> Self {
        Self {
            logo_text: "NEXUS".to_string(),
            logo_accent: ".DEV".to_string(),
            menu_text: "Menu".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hero {
    pub label: String,
    pub title_line1: String,
    pub title_line2: String,
    pub title_line3: String,
    pub scroll_text: String,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            label: "LEVEL 100 DESIGNER".to_string(),
            title_line1: "Crafting".to_string(),
            title_line2: "Digital".to_string(),
            title_line3: "Chaos".to_string(),
            scroll_text: "SCROLL TO PLAY".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarqueePhrase {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl MarqueePhrase {
    pub fn new(text: &str, color: &str) -> Self {
        Self {
            text: text.to_string(),
            color: Some(color.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub title: String,
    pub stats: Vec<Stat>,
    pub manifesto: String,
}

impl Default for About {
    fn default() -> Self {
        let stats = [
            ("CLASS", "Creative Technologist"),
            ("STR", "92 (Visuals)"),
            ("INT", "98 (Code)"),
            ("LUCK", "50 (RNG)"),
        ]
        .into_iter()
        .map(|(label, value)| Stat {
            label: label.to_string(),
            value: value.to_string(),
        })
        .collect();
        Self {
            title: "[ PLAYER PROFILE ]".to_string(),
            stats,
            manifesto: "I don't just design websites; I build digital playgrounds. \
                        Combining raw aesthetics with fluid interactions."
                .to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Project {
    pub fn new(title: &str, category: &str, color: &str) -> Self {
        Self {
            title: title.to_string(),
            category: category.to_string(),
            color: Some(color.to_string()),
            url: Some("#".to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Skill {
    pub fn new(title: &str, desc: &str, color: &str, icon: &str) -> Self {
        Self {
            title: title.to_string(),
            desc: desc.to_string(),
            color: Some(color.to_string()),
            icon: Some(icon.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Footer {
    pub heading: String,
    pub btn_text: String,
    pub socials: Vec<Social>,
    pub copyright: String,
    pub tagline: String,
}

impl Default for Footer {
    fn default() -> Self {
        let socials = ["TWITTER", "LINKEDIN", "GITHUB"]
            .into_iter()
            .map(|name| Social {
                name: name.to_string(),
                url: "#".to_string(),
            })
            .collect();
        Self {
            heading: "Ready to Start Game?".to_string(),
            btn_text: "Insert Coin".to_string(),
            socials,
            copyright: "© 2025 NEXUS DESIGNS. ALL RIGHTS RESERVED.".to_string(),
            tagline: "DESIGNED WITH CHAOS & CODE".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Social {
    pub name: String,
    #[serde(default)]
    pub url: String,
}
