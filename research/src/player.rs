use periodic_glicko2::{PlayerId, RatingSystem, Registry};
use rustc_hash::FxHashMap;

/// Maps player names from the input to identities, registering each new
/// name with the default rating.
#[derive(Default)]
pub struct PlayerIds {
    inner: FxHashMap<Box<str>, PlayerId>,
}

impl PlayerIds {
    pub fn get_or_insert(
        &mut self,
        name: &str,
        registry: &mut Registry,
        rating_system: &RatingSystem,
    ) -> PlayerId {
        if let Some(id) = self.inner.get(name) {
            return *id;
        }
        let id = registry.create_player(rating_system);
        self.inner.insert(name.into(), id);
        id
    }

    pub fn get(&self, name: &str) -> Option<PlayerId> {
        self.inner.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PlayerId)> {
        self.inner.iter().map(|(name, id)| (&**name, *id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert() {
        let rating_system = RatingSystem::new();
        let mut registry = Registry::new();
        let mut players = PlayerIds::default();

        let alice = players.get_or_insert("alice", &mut registry, &rating_system);
        let bob = players.get_or_insert("bob", &mut registry, &rating_system);
        assert_ne!(alice, bob);
        assert_eq!(players.get_or_insert("alice", &mut registry, &rating_system), alice);
        assert_eq!(players.get("bob"), Some(bob));
        assert_eq!(players.get("carol"), None);
        assert_eq!(players.len(), 2);
        assert_eq!(registry.len(), 2);
    }
}
