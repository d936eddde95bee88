use crate::flower::entity::Flower;

/// Insertion-ordered collection of every flower on the canvas.
///
/// Flowers are never removed individually; only [`FlowerRegistry::clear`] empties it.
#[derive(Clone, Debug, Default)]
pub struct FlowerRegistry {
    flowers: Vec<Flower>,
}

impl FlowerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, flower: Flower) {
        self.flowers.push(flower);
    }

    pub fn deactivate_all(&mut self) {
        for f in &mut self.flowers {
            f.deactivate();
        }
    }

    /// Remove every flower. There is no undo.
    pub fn clear(&mut self) {
        self.flowers.clear();
    }

    pub fn len(&self) -> usize {
        self.flowers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Flower> {
        self.flowers.get(index)
    }

    pub fn last(&self) -> Option<&Flower> {
        self.flowers.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flower> {
        self.flowers.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Flower> {
        self.flowers.iter_mut()
    }

    pub fn active_count(&self) -> usize {
        self.flowers.iter().filter(|f| f.is_active()).count()
    }

    /// Current rotation of every flower, in insertion order.
    pub fn rotations(&self) -> Vec<f64> {
        self.flowers.iter().map(Flower::rotation).collect()
    }
}

impl<'a> IntoIterator for &'a FlowerRegistry {
    type Item = &'a Flower;
    type IntoIter = std::slice::Iter<'a, Flower>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flower/registry.rs"]
mod tests;
