use super::*;
use crate::config::settings::Settings;
use crate::flower::entity::FlowerSpec;
use crate::foundation::core::Point;
use rand::SeedableRng;

fn flower_at(x: f64, rng: &mut rand::rngs::StdRng) -> Flower {
    Flower::new(FlowerSpec::from_settings(
        Point::new(x, 0.0),
        &Settings::default(),
        rng,
    ))
}

#[test]
fn keeps_insertion_order() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let mut reg = FlowerRegistry::new();
    for x in [3.0, 1.0, 2.0] {
        reg.push(flower_at(x, &mut rng));
    }
    let xs: Vec<f64> = reg.iter().map(|f| f.center().x).collect();
    assert_eq!(xs, vec![3.0, 1.0, 2.0]);
    assert_eq!(reg.last().map(|f| f.center().x), Some(2.0));
    assert_eq!(reg.rotations().len(), 3);
}

#[test]
fn deactivate_all_then_clear() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let mut reg = FlowerRegistry::new();
    reg.push(flower_at(0.0, &mut rng));
    reg.push(flower_at(1.0, &mut rng));
    assert_eq!(reg.active_count(), 2);

    reg.deactivate_all();
    assert_eq!(reg.active_count(), 0);
    assert_eq!(reg.len(), 2);

    reg.clear();
    assert!(reg.is_empty());
}
