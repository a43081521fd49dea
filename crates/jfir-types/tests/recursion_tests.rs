use super::*;

#[test]
fn test_enter_and_leave() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::with_profile(RecursionProfile::BoundErasure);
    assert!(guard.enter(1).is_entered());
    assert!(guard.is_visiting(&1));
    assert_eq!(guard.depth(), 1);
    guard.leave(&1);
    assert!(!guard.is_visiting(&1));
    assert_eq!(guard.depth(), 0);
}

#[test]
fn test_cycle_detection() {
    let mut guard: RecursionGuard<&str> = RecursionGuard::with_profile(RecursionProfile::SupertypeWalk);
    let result = guard.scope("A", |guard| guard.enter("A"));
    assert_eq!(result, Ok(RecursionResult::Cycle));
}

#[test]
fn test_depth_limit() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::with_profile(RecursionProfile::Custom {
        max_depth: 2,
        max_iterations: 100,
    });
    assert!(guard.enter(1).is_entered());
    assert!(guard.enter(2).is_entered());
    assert!(guard.enter(3).is_exceeded());
    guard.leave(&2);
    guard.leave(&1);
}

#[test]
fn test_iteration_limit() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::new(10, 3);
    for key in 0..3 {
        assert!(guard.scope(key, |_| ()).is_ok());
    }
    assert_eq!(guard.enter(99), RecursionResult::IterationExceeded);
}

#[test]
fn test_scope_nested_keys() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::new(8, 100);
    let depth = guard.scope(1, |guard| guard.scope(2, |guard| guard.depth()).unwrap_or(0));
    assert_eq!(depth, Ok(2));
    assert_eq!(guard.depth(), 0);
}
