//! Alien Spawning
//!
//! Names aliens and drops them onto random cities.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

use crate::components::Alien;
use crate::world::Map;

const ADJECTIVES: &[&str] = &[
    "ancient", "bitter", "black", "bold", "brave", "broken", "calm", "cold", "crimson", "cruel",
    "damp", "dark", "dawn", "delicate", "divine", "dry", "empty", "falling", "fancy", "flat",
    "floral", "fragrant", "frosty", "gentle", "green", "hidden", "holy", "icy", "jolly", "late",
    "lingering", "little", "lively", "long", "lucky", "misty", "morning", "muddy", "nameless", "noisy",
    "odd", "old", "orange", "patient", "plain", "polished", "proud", "purple", "quiet", "rapid",
    "raspy", "red", "restless", "rough", "round", "royal", "shiny", "shrill", "shy", "silent",
    "small", "snowy", "soft", "solitary", "sparkling", "spring", "square", "steep", "still", "summer",
    "super", "sweet", "throbbing", "tight", "tiny", "twilight", "wandering", "weathered", "white", "wild",
    "winter", "wispy", "withered", "yellow", "young",
];

const NOUNS: &[&str] = &[
    "art", "band", "bar", "base", "bird", "block", "boat", "bonus", "bread", "breeze",
    "brook", "bush", "butterfly", "cake", "cell", "cherry", "cloud", "credit", "darkness", "dawn",
    "dew", "disk", "dream", "dust", "feather", "field", "fire", "firefly", "flower", "fog",
    "forest", "frog", "frost", "glade", "glitter", "grass", "hall", "hat", "haze", "heart",
    "hill", "king", "lab", "lake", "leaf", "limit", "math", "meadow", "mode", "moon",
    "morning", "mountain", "mouse", "mud", "night", "paper", "pine", "poetry", "pond", "queen",
    "rain", "recipe", "resonance", "rice", "river", "salad", "scene", "sea", "shadow", "shape",
    "silence", "sky", "smoke", "snow", "snowflake", "sound", "star", "sun", "sunset", "surf",
    "term", "thunder", "tooth", "tree", "truth", "union", "unit", "violet", "voice", "water",
    "waterfall", "wave", "wildflower", "wind", "wood",
];

/// Produces `adjective-noun` names, adding a counter on repeats.
#[derive(Debug, Default)]
pub struct NameGenerator {
    issued: HashMap<String, usize>,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&mut self, rng: &mut impl Rng) -> String {
        let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
        let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
        let base = format!("{}-{}", adjective, noun);

        let seen = self.issued.entry(base.clone()).or_insert(0);
        *seen += 1;
        if *seen == 1 {
            base
        } else {
            format!("{}-{}", base, seen)
        }
    }
}

/// Create `count` aliens, each on a uniformly random city.
///
/// Cities are drawn from the ascending name list so a seeded RNG gives the
/// same placement every time. A map without cities gets no aliens.
pub fn spawn_aliens(count: usize, map: &Map, rng: &mut impl Rng) -> Vec<Alien> {
    let cities = map.city_names();
    if cities.is_empty() {
        if count > 0 {
            tracing::warn!("No cities to place {} aliens on", count);
        }
        return Vec::new();
    }

    spawn_iter(count, &cities, rng).collect()
}

/// Yields up to `count` aliens lazily, without reserving space for them.
fn spawn_iter<'a, R: Rng>(
    count: usize,
    cities: &'a [String],
    rng: &'a mut R,
) -> impl Iterator<Item = Alien> + 'a {
    let mut names = NameGenerator::new();
    (0..count).filter_map(move |id| {
        let name = names.generate(&mut *rng);
        cities
            .choose(&mut *rng)
            .map(|city| Alien::new(id, name, city.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut generator = NameGenerator::new();
        let names: Vec<String> = (0..5000).map(|_| generator.generate(&mut rng)).collect();
        let distinct: HashSet<&String> = names.iter().collect();
        assert_eq!(distinct.len(), names.len());
    }

    #[test]
    fn test_name_shape() {
        let mut rng = SmallRng::seed_from_u64(9);
        let name = NameGenerator::new().generate(&mut rng);
        let (adjective, noun) = name.split_once('-').unwrap();
        assert!(ADJECTIVES.contains(&adjective));
        assert!(NOUNS.contains(&noun));
    }

    #[test]
    fn test_spawn_aliens() {
        let map = Map::parse("a north=b\nb south=c\n").unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let aliens = spawn_aliens(10, &map, &mut rng);

        assert_eq!(aliens.len(), 10);
        for (index, alien) in aliens.iter().enumerate() {
            assert_eq!(alien.id.0, index);
            assert!(map.has_city(&alien.current_city));
            assert!(alien.is_alive());
        }
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let map = Map::parse("a north=b\nb south=c\nc east=d\n").unwrap();
        let first = spawn_aliens(8, &map, &mut SmallRng::seed_from_u64(3));
        let second = spawn_aliens(8, &map, &mut SmallRng::seed_from_u64(3));
        assert_eq!(first, second);
    }

    #[test]
    fn test_spawn_does_not_reserve_for_count() {
        let cities = vec!["a".to_string(), "b".to_string()];
        let mut rng = SmallRng::seed_from_u64(5);
        let first: Vec<Alien> = spawn_iter(usize::MAX, &cities, &mut rng).take(4).collect();
        assert_eq!(first.len(), 4);
        assert_eq!(first[3].id.0, 3);
    }

    #[test]
    fn test_spawn_on_empty_map() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(spawn_aliens(3, &Map::new(), &mut rng).is_empty());
    }
}
