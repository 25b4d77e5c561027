use anyhow::Result;
use sbf_core::{estimate, BloomError, BloomFilter, BloomFilterBuilder, FilterHandle};

#[test]
fn ten_element_filter_scenario() -> Result<()> {
    let params = estimate(10, 0.01)?;
    let mut f = BloomFilter::with_params(params)?;
    assert!(!f.test_uints(&(0u32..10).collect::<Vec<_>>()).iter().any(|b| *b));

    f.add_uints(&[1u32, 5, 6]);
    let expected = [false, true, false, false, false, true, true, false, false, false];
    assert_eq!(f.test_uints(&(0u32..10).collect::<Vec<_>>()), expected);

    // survives a trip through the wire format
    let restored = BloomFilter::new_from_serialized(&f.to_bytes())?;
    assert_eq!(restored.test_uints(&(0u64..10).collect::<Vec<_>>()), expected);
    Ok(())
}

#[test]
fn fresh_filter_round_trips_byte_for_byte() -> Result<()> {
    let f = BloomFilterBuilder::new().estimates(10, 0.01).build()?;
    let bytes = f.to_bytes();
    let g = BloomFilterBuilder::new().serialized(&bytes).build()?;
    assert_eq!(g.to_bytes(), bytes);
    Ok(())
}

#[test]
fn byte_keys_and_uint_keys() -> Result<()> {
    let mut f = BloomFilter::new_with_estimates(10, 0.01)?;
    assert!(!f.test_key(&[0u8, 0, 0]));
    f.add_key(&[0u8, 5, 128]);
    assert!(f.test_key(&[0u8, 5, 128]));

    f.add_key(3u32);
    assert!(f.test_key(3u64));
    Ok(())
}

#[test]
fn estimator_boundaries() {
    for (n, p) in [(0, 0.01), (1000, 0.0), (1000, 1.0)] {
        assert!(matches!(estimate(n, p), Err(BloomError::InvalidParameter(_))));
    }
}

#[test]
fn construction_modes() {
    assert!(matches!(BloomFilterBuilder::new().build(), Err(BloomError::InvalidConstruction(_))));
    let both = BloomFilterBuilder::new().estimates(10, 0.01).serialized(&[0, 1, 2, 3]).build();
    assert!(matches!(both, Err(BloomError::InvalidConstruction(_))));
}

#[test]
fn merging_shards_under_a_lock() -> Result<()> {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let params = estimate(4000, 0.01)?;
    let global = Arc::new(Mutex::new(BloomFilter::with_params(params)?));
    let mut workers = Vec::new();
    for shard in 0u64..4 {
        let global = Arc::clone(&global);
        workers.push(thread::spawn(move || -> sbf_core::Result<()> {
            let mut local = BloomFilter::with_params(params)?;
            local.add_uints(&(shard * 1000..(shard + 1) * 1000).collect::<Vec<_>>());
            global.lock().expect("lock").merge(&local)
        }));
    }
    for w in workers {
        w.join().expect("worker")?;
    }
    let f = global.lock().expect("lock");
    assert!(f.test_uints(&(0u64..4000).collect::<Vec<_>>()).into_iter().all(|b| b));
    Ok(())
}

#[test]
fn handle_lifecycle() -> Result<()> {
    let mut h = FilterHandle::construct(Some((10, 0.01)), None)?;
    h.add_uints(&[1u32, 5, 6]);
    let bytes = h.serialize();
    h.destroy();

    let g = FilterHandle::construct(None, Some(bytes.as_slice()))?;
    assert_eq!(g.test_uints(&(0u32..10).collect::<Vec<_>>()), [0, 1, 0, 0, 0, 1, 1, 0, 0, 0]);
    assert_eq!(g.into_filter().to_bytes(), bytes);
    Ok(())
}
