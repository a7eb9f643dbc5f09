//! # grt-catalog
//!
//! The four RICH principles a student can set a goal against.
//!
//! The catalog is fixed at compile time: no principle is added, removed, or
//! mutated at runtime. Principle ids form the closed key domain of the
//! suggestion table in `grt-suggest`.

use serde::Serialize;

/// One character-education principle.
///
/// The color fields are opaque palette tokens. Only front ends interpret
/// them; the state machine never looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Principle {
    /// Unique key (e.g., "responsibility").
    pub id: &'static str,

    /// Display label (e.g., "Responsibility").
    pub name: &'static str,

    /// Foreground color token.
    pub color: &'static str,

    /// Background color token.
    pub bg_color: &'static str,

    /// Hover color token.
    pub hover_color: &'static str,

    /// Explanatory text shown on the picker card.
    pub description: &'static str,

    /// Asset reference for the card illustration.
    pub cloud_image: &'static str,
}

impl Principle {
    /// Palette family of the foreground token, e.g. `"red"` for `text-red-600`.
    ///
    /// Returns `None` when the token doesn't follow the `<prefix>-<family>-<shade>` shape.
    pub fn color_family(&self) -> Option<&'static str> {
        let mut parts = self.color.split('-');
        let _prefix = parts.next()?;
        let family = parts.next()?;
        parts.next()?;
        Some(family)
    }
}

/// Letters of the badge row on the picker screen, one per principle.
pub const BADGE_LETTERS: &str = "RICH";

/// The catalog, in display order.
pub const PRINCIPLES: [Principle; 4] = [
    Principle {
        id: "i-matter",
        name: "I Matter",
        color: "text-blue-600",
        bg_color: "bg-blue-500",
        hover_color: "hover:bg-blue-600",
        description: "Setting goals that help me value myself and build confidence",
        cloud_image: "/i-matter-cloud.png",
    },
    Principle {
        id: "responsibility",
        name: "Responsibility",
        color: "text-red-600",
        bg_color: "bg-red-500",
        hover_color: "hover:bg-red-600",
        description: "Taking ownership of my actions and commitments",
        cloud_image: "/responsibility-cloud.png",
    },
    Principle {
        id: "considerate",
        name: "Considerate",
        color: "text-yellow-600",
        bg_color: "bg-yellow-500",
        hover_color: "hover:bg-yellow-600",
        description: "Being thoughtful and kind in my interactions with others",
        cloud_image: "/considerate-cloud.png",
    },
    Principle {
        id: "strategies",
        name: "Strategies",
        color: "text-green-600",
        bg_color: "bg-green-500",
        hover_color: "hover:bg-green-600",
        description: "Developing smart approaches to reach my goals",
        cloud_image: "/strategies-cloud.png",
    },
];

/// All principles in display order.
pub fn all() -> &'static [Principle] {
    &PRINCIPLES
}

/// Look up a principle by id.
pub fn find(id: &str) -> Option<&'static Principle> {
    PRINCIPLES.iter().find(|p| p.id == id)
}

/// Badge row: each letter of [`BADGE_LETTERS`] paired with the principle whose color it wears.
pub fn badges() -> impl Iterator<Item = (char, &'static Principle)> {
    BADGE_LETTERS.chars().zip(PRINCIPLES.iter())
}

/// Display position of a principle id.
pub fn position(id: &str) -> Option<usize> {
    PRINCIPLES.iter().position(|p| p.id == id)
}
