//! Property-based tests for the combinator laws

use anyhow::anyhow;
use proptest::prelude::*;
use taskchain::prelude::*;
use taskchain::task::Ready;
use taskchain::testing::CallCounter;

fn settle<Tk: Task>(task: Tk) -> Result<Tk::Output, String> {
    tokio_test::block_on(task.run()).map_err(|e| e.to_string())
}

fn source(value: i32, fails: bool) -> Ready<i32> {
    if fails {
        faulted(anyhow!("source failed with {value}"))
    } else {
        fulfilled(value)
    }
}

proptest! {
    #[test]
    fn prop_map_identity(value in any::<i32>(), fails in any::<bool>()) {
        prop_assert_eq!(
            settle(source(value, fails).map(|x| x)),
            settle(source(value, fails))
        );
    }

    #[test]
    fn prop_map_composition(value in any::<i32>(), fails in any::<bool>()) {
        let f = |x: i32| x.wrapping_mul(3);
        let g = |x: i32| x.wrapping_sub(7);

        prop_assert_eq!(
            settle(source(value, fails).map(f).map(g)),
            settle(source(value, fails).map(move |x| g(f(x))))
        );
    }

    #[test]
    fn prop_bind_left_identity(value in any::<i32>()) {
        let f = |x: i32| fulfilled(x.wrapping_add(1));
        prop_assert_eq!(settle(fulfilled(value).bind(f)), settle(f(value)));
    }

    #[test]
    fn prop_bind_right_identity(value in any::<i32>(), fails in any::<bool>()) {
        prop_assert_eq!(
            settle(source(value, fails).bind(fulfilled)),
            settle(source(value, fails))
        );
    }

    #[test]
    fn prop_bind_associativity(value in any::<i32>(), fails in any::<bool>()) {
        let f = |x: i32| fulfilled(x.wrapping_mul(2));
        let g = |x: i32| {
            if x % 3 == 0 {
                faulted(anyhow!("{x} divisible by three"))
            } else {
                fulfilled(x)
            }
        };

        prop_assert_eq!(
            settle(source(value, fails).bind(f).bind(g)),
            settle(source(value, fails).bind(move |x| f(x).bind(g)))
        );
    }

    #[test]
    fn prop_map_err_identity(value in any::<i32>(), fails in any::<bool>()) {
        prop_assert_eq!(
            settle(source(value, fails).map_err(|e| e)),
            settle(source(value, fails))
        );
    }

    #[test]
    fn prop_failure_never_invokes_value_handlers(value in any::<i32>()) {
        let counter = CallCounter::new();
        let (a, b, c) = (counter.clone(), counter.clone(), counter.clone());

        let result = settle(
            source(value, true)
                .map(move |x| {
                    a.hit();
                    x
                })
                .bind(move |x| {
                    b.hit();
                    fulfilled(x)
                })
                .if_fulfilled(move |_| c.hit()),
        );

        prop_assert!(result.is_err());
        prop_assert_eq!(counter.count(), 0);
    }

    #[test]
    fn prop_filter_matches_predicate(value in any::<i32>()) {
        let result = settle(fulfilled(value).filter(|x| *x >= 0, anyhow!("negative")));
        prop_assert_eq!(result.is_ok(), value >= 0);
    }

    #[test]
    fn prop_alt_prefers_success(value in any::<i32>(), fallback in any::<i32>(), fails in any::<bool>()) {
        let expected = if fails { fallback } else { value };
        prop_assert_eq!(
            settle(source(value, fails).alt(fulfilled(fallback))),
            Ok(expected)
        );
    }

    #[test]
    fn prop_if_fulfilled_preserves_outcome(value in any::<i32>(), fails in any::<bool>()) {
        prop_assert_eq!(
            settle(source(value, fails).if_fulfilled(|_| ()).if_faulted(|_| ())),
            settle(source(value, fails))
        );
    }

    #[test]
    fn prop_partition_counts(flags in prop::collection::vec(any::<bool>(), 0..20)) {
        let tasks: Vec<_> = flags
            .iter()
            .enumerate()
            .map(|(i, fails)| source(i as i32, *fails))
            .collect();

        let (faulted, fulfilled) = tokio_test::block_on(partition(tasks).run())
            .map_err(|e| TestCaseError::fail(e.to_string()))?
            .into_parts();

        let failures = flags.iter().filter(|f| **f).count();
        prop_assert_eq!(faulted.len(), failures);
        prop_assert_eq!(fulfilled.len(), flags.len() - failures);
        prop_assert!(fulfilled.windows(2).all(|w| w[0] < w[1]));
    }
}
