//! Victory flavor text shown after a manual session.

use std::{fs, path::Path};

use log::warn;
use rand::{seq::SliceRandom, Rng};

const FALLBACK_FOODS: [&str; 5] = [
    "a wedge of emmental",
    "a sunflower seed",
    "a crust of rye bread",
    "a ripe blackberry",
    "a crumb of gouda",
];

/// Reads one food per line from `path`, falling back to a built-in list.
///
/// Blank lines are skipped. A missing, unreadable or empty file is logged and
/// replaced by the fallback list, so the result is never empty.
pub(crate) fn load_foods(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let foods: Vec<String> = text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect();
            if foods.is_empty() {
                warn!("{} lists no foods; using the built-in menu", path.display());
                fallback_foods()
            } else {
                foods
            }
        }
        Err(error) => {
            warn!("could not read {}: {error}; using the built-in menu", path.display());
            fallback_foods()
        }
    }
}

/// Picks a random food and phrases the victory message around it.
pub(crate) fn victory_line<R>(foods: &[String], rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let food = foods
        .choose(rng)
        .map_or(FALLBACK_FOODS[0], String::as_str);
    format!("You find and devour {food}. Victory is sweet.")
}

fn fallback_foods() -> Vec<String> {
    FALLBACK_FOODS.iter().map(|food| (*food).to_owned()).collect()
}
