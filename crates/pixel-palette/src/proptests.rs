use super::*;

use proptest::prelude::*;
use std::collections::BTreeSet;

fn validate_map(map: &PaletteMap) {
    let mut below: Vec<u32> = map.iter().map(|e| e.key()).collect();
    assert!(
        below.windows(2).all(|w| w[0] < w[1]),
        "level 0 must be strictly ascending"
    );
    assert_eq!(below.len(), map.len(), "level 0 must hold every entry");

    for level in 1..MAX_LEVEL {
        let keys: Vec<u32> = map.level_iter(level).map(|e| e.key()).collect();
        let mut it = below.iter();
        for key in &keys {
            assert!(
                it.any(|k| k == key),
                "level {level} must be a subsequence of level {}",
                level - 1
            );
        }
        if level >= map.height() {
            assert!(keys.is_empty(), "levels at or above height must be empty");
        }
        below = keys;
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(u32),
    Get(u32),
}

fn key_strategy() -> impl Strategy<Value = u32> + Clone {
    // mix a narrow band (many repeats) with the full range
    prop_oneof![0u32..64, any::<u32>()]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        70 => key.clone().prop_map(Op::Insert),
        30 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=1000)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_btreeset(ops in ops_strategy(), seed in any::<u64>()) {
        let mut map = PaletteMap::with_seed(seed);
        let mut model: BTreeSet<u32> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let before = map.find(key);
                    let id = map.find_or_insert(key).unwrap();
                    prop_assert_eq!(map.entry(id).key(), key);
                    if let Some(existing) = before {
                        prop_assert_eq!(existing, id);
                    }
                    model.insert(key);
                }
                Op::Get(key) => {
                    prop_assert_eq!(map.get(key).is_some(), model.contains(&key));
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }

        let keys: Vec<u32> = map.iter().map(|e| e.key()).collect();
        let expected: Vec<u32> = model.into_iter().collect();
        prop_assert_eq!(keys, expected);
        validate_map(&map);
    }

    #[test]
    fn prop_assignment_colors_every_entry(keys in prop::collection::vec(any::<u32>(), 3..200)) {
        let mut map = PaletteMap::with_seed(0);
        for &k in &keys {
            map.find_or_insert(k).unwrap();
        }
        let n = assign_colors(&mut map);
        prop_assert_eq!(n, map.len());

        let colors: Vec<Rgb> = map.iter().map(|e| e.color()).collect();
        prop_assert_eq!(colors[0], Rgb::WHITE);
        if n >= 2 {
            prop_assert_eq!(colors[1], Rgb::BLACK);
        }
        for (i, entry) in map.iter().enumerate() {
            prop_assert_eq!(entry.color(), Rgb::from(sweep_hsv(i, n)));
        }
    }
}
