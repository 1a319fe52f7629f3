// ABOUTME: Deterministic status-bar colours so many sessions stay visually distinct
// Purely cosmetic; the same name always maps to the same colour within a build

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const SESSION_COLOURS: [&str; 20] = [
    "blue",
    "magenta",
    "cyan",
    "green",
    "yellow",
    "red",
    "colour39",  // deep sky blue
    "colour208", // orange
    "colour135", // medium purple
    "colour70",  // chartreuse
    "colour197", // deep pink
    "colour33",  // dodger blue
    "colour172", // dark orange
    "colour48",  // spring green
    "colour99",  // slate blue
    "colour214", // gold
    "colour168", // hot pink
    "colour37",  // teal
    "colour190", // yellow-green
    "colour63",  // royal blue
];

pub fn colour_for(name: &str) -> &'static str {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    let index = (hasher.finish() % SESSION_COLOURS.len() as u64) as usize;
    SESSION_COLOURS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_is_stable_for_a_name() {
        assert_eq!(colour_for("web"), colour_for("web"));
        assert_eq!(colour_for("api-server"), colour_for("api-server"));
    }

    #[test]
    fn test_colour_comes_from_palette() {
        for name in ["a", "web", "api", "long_session-name-42"] {
            assert!(SESSION_COLOURS.contains(&colour_for(name)));
        }
    }

    #[test]
    fn test_names_spread_across_palette() {
        let distinct: std::collections::HashSet<_> =
            (0..200).map(|i| colour_for(&format!("session-{}", i))).collect();
        assert!(distinct.len() > 10);
    }
}
