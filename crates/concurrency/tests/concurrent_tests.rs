//! Concurrent/Multi-threaded Tests for kihon-concurrency
//!
//! These tests verify `WriteOnceCell` under actual concurrent execution:
//!
//! 1. **Single Winner** - Racing writers, exactly one succeeds
//! 2. **Visibility** - Readers observe the written value after `write` returns
//! 3. **Properties** - Write sequences of any length accept only the first
//!
//! ## Running These Tests
//!
//! ```bash
//! cargo test --test concurrent_tests
//! ```

use kihon_concurrency::{CellError, WriteOnceCell};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

// ============================================================================
// SECTION 1: Single Winner
// ============================================================================

mod single_winner {
    use super::*;

    /// All threads are released at once and attempt a write.
    /// Exactly one write may succeed and its value must be the one read back.
    #[test]
    fn test_racing_writers_one_wins() {
        const THREADS: usize = 16;

        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let cell = Arc::new(WriteOnceCell::new("race"));
        let barrier = Arc::new(Barrier::new(THREADS));
        let winners = Arc::new(Mutex::new(Vec::new()));
        let losers = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let cell = Arc::clone(&cell);
                let barrier = Arc::clone(&barrier);
                let winners = Arc::clone(&winners);
                let losers = Arc::clone(&losers);
                thread::spawn(move || {
                    barrier.wait();
                    match cell.write(i) {
                        Ok(()) => winners.lock().push(i),
                        Err(CellError::AlreadySet { name }) => {
                            assert_eq!(name, "race");
                            losers.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let winners = winners.lock();
        assert_eq!(winners.len(), 1);
        assert_eq!(losers.load(Ordering::SeqCst), THREADS - 1);
        assert_eq!(cell.read().unwrap(), winners[0]);
    }

    #[test]
    fn test_racing_writers_over_default() {
        const THREADS: usize = 8;

        let cell = Arc::new(WriteOnceCell::with_default("race", usize::MAX));
        let barrier = Arc::new(Barrier::new(THREADS));
        let successes = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let cell = Arc::clone(&cell);
                let barrier = Arc::clone(&barrier);
                let successes = Arc::clone(&successes);
                thread::spawn(move || {
                    barrier.wait();
                    if cell.write(i).is_ok() {
                        successes.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(successes.load(Ordering::SeqCst), 1);
        assert!(cell.read().unwrap() < THREADS);
    }
}

// ============================================================================
// SECTION 2: Visibility
// ============================================================================

mod visibility {
    use super::*;

    /// Readers spin until the cell is set, then must see the written value.
    #[test]
    fn test_readers_observe_written_value() {
        const READERS: usize = 8;

        let cell: Arc<WriteOnceCell<String>> = Arc::new(WriteOnceCell::new("shared"));
        let barrier = Arc::new(Barrier::new(READERS + 1));

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    loop {
                        match cell.read() {
                            Ok(value) => return value,
                            Err(CellError::NotSet { .. }) => thread::yield_now(),
                            Err(other) => panic!("unexpected error: {other}"),
                        }
                    }
                })
            })
            .collect();

        barrier.wait();
        cell.write("published".to_string()).unwrap();

        for reader in readers {
            assert_eq!(reader.join().unwrap(), "published");
        }
    }

    /// With a default, readers never fail; they see either the default or
    /// the written value and nothing else.
    #[test]
    fn test_readers_see_default_or_written() {
        const READERS: usize = 4;
        const ITERATIONS: usize = 1_000;

        let cell = Arc::new(WriteOnceCell::with_default("flag", 0u32));
        let barrier = Arc::new(Barrier::new(READERS + 1));

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..ITERATIONS {
                        let value = cell.read().unwrap();
                        assert!(value == 0 || value == 7);
                    }
                })
            })
            .collect();

        barrier.wait();
        cell.write(7).unwrap();

        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(cell.read().unwrap(), 7);
    }
}

// ============================================================================
// SECTION 3: Properties
// ============================================================================

proptest! {
    /// Only the first of any sequence of writes is accepted
    #[test]
    fn prop_only_first_write_wins(writes in prop::collection::vec(any::<i64>(), 1..32)) {
        let cell = WriteOnceCell::new("prop");
        for (i, value) in writes.iter().enumerate() {
            let result = cell.write(*value);
            prop_assert_eq!(result.is_ok(), i == 0);
        }
        prop_assert_eq!(cell.read().unwrap(), writes[0]);
    }

    /// A default is readable until replaced by the single write
    #[test]
    fn prop_default_then_write(default in any::<i64>(), written in any::<i64>()) {
        let cell = WriteOnceCell::with_default("prop", default);
        prop_assert_eq!(cell.read().unwrap(), default);
        cell.write(written).unwrap();
        prop_assert_eq!(cell.read().unwrap(), written);
        prop_assert!(cell.write(default).is_err());
    }
}
