// Randomized comparison against std collections

use probe_tables::{DoubleKeyTable, InfiniteHashTable, LinearProbeTable};
use rand::Rng;
use std::collections::{BTreeMap, HashMap};
use test_log::test;

const OPS: usize = 5_000;

fn random_word(rng: &mut impl Rng) -> String {
    let len = rng.random_range(0..5);
    (0..len)
        .map(|_| char::from(rng.random_range(b'a'..=b'e')))
        .collect()
}

#[test]
fn model_linear_probe() -> probe_tables::Result<()> {
    let mut rng = rand::rng();
    let mut table = LinearProbeTable::new();
    let mut model = HashMap::new();

    for step in 0..OPS {
        let key = random_word(&mut rng);

        if rng.random_bool(0.6) {
            assert_eq!(model.insert(key.clone(), step), table.set(key, step)?);
        } else {
            match model.remove(&key) {
                Some(expected) => assert_eq!(expected, table.delete(&key)?),
                None => assert!(table.delete(&key).is_err()),
            }
        }

        assert_eq!(model.len(), table.len());
    }

    for (key, value) in &model {
        assert_eq!(value, table.get(key)?);
    }

    Ok(())
}

#[test]
fn model_double_key() -> probe_tables::Result<()> {
    let mut rng = rand::rng();
    let mut table = DoubleKeyTable::new();
    let mut model: HashMap<String, HashMap<String, usize>> = HashMap::new();

    for step in 0..OPS {
        let key1 = random_word(&mut rng);
        let key2 = random_word(&mut rng);

        if rng.random_bool(0.6) {
            let expected = model
                .entry(key1.clone())
                .or_default()
                .insert(key2.clone(), step);
            assert_eq!(expected, table.set(&key1, key2, step)?);
        } else {
            let expected = model.get_mut(&key1).and_then(|inner| inner.remove(&key2));
            if model.get(&key1).is_some_and(HashMap::is_empty) {
                model.remove(&key1);
            }

            match expected {
                Some(expected) => assert_eq!(expected, table.delete(&key1, &key2)?),
                None => assert!(table.delete(&key1, &key2).unwrap_err().is_not_found()),
            }
        }

        assert_eq!(model.len(), table.len());
    }

    for (key1, inner) in &model {
        assert_eq!(inner.len(), table.keys(Some(key1))?.len());
        for (key2, value) in inner {
            assert_eq!(value, table.get(key1, key2)?);
        }
    }

    Ok(())
}

#[test]
fn model_infinite() -> probe_tables::Result<()> {
    let mut rng = rand::rng();
    let mut table = InfiniteHashTable::new();
    let mut model = BTreeMap::new();

    for step in 0..OPS {
        let key = random_word(&mut rng);

        if rng.random_bool(0.6) {
            assert_eq!(model.insert(key.clone(), step), table.set(key, step)?);
        } else {
            match model.remove(&key) {
                Some(expected) => assert_eq!(expected, table.delete(&key)?),
                None => assert!(table.delete(&key).is_err()),
            }
        }

        assert_eq!(model.len(), table.len());
    }

    assert_eq!(
        model.keys().map(String::as_str).collect::<Vec<_>>(),
        table.sort_keys(),
    );

    Ok(())
}
