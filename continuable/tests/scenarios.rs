//! End-to-end scenarios from spec.md §8's scenario table, one test per row.

use continuable_core::error::Error;
use continuable_core::result::empty_result;
use continuable::{make_cancelling, make_continuable, make_exceptional, make_ready, Completion, Value};

#[derive(Debug, thiserror::Error)]
#[error("boom")]
struct Boom;

/// 1. `make_ready(1,2).then(|a,b| a+b)` -> terminal: success with `3`.
#[test]
fn scenario_1_ready_then_sums() {
    let c = make_ready((1, 2)).then(|(a, b)| Value(a + b));
    assert_eq!(c.unpack().into_value(), Some((3,)));
}

/// 2. `make_exceptional(E).then(|x| x+1).fail(|e| 7)` -> terminal: success
/// with `7`; the success handler never runs.
#[test]
fn scenario_2_fail_handler_recovers() {
    let ran = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let ran2 = ran.clone();
    let c = make_exceptional::<(i32,)>(Error::new(Boom))
        .then(move |(x,)| {
            ran2.store(true, std::sync::atomic::Ordering::SeqCst);
            Value(x + 1)
        })
        .fail(|_e| Value(7));
    assert_eq!(c.unpack().into_value(), Some((7,)));
    assert!(!ran.load(std::sync::atomic::Ordering::SeqCst));
}

/// 3. `all(ready("a"), ready(1,2), ready_void()).then(|s,i,j| ...)`: handler
/// called once with `("a",1,2)`.
#[test]
fn scenario_3_all_concatenates_three_operands() {
    let c = (make_ready(("a",)) & make_ready((1, 2))) & make_ready(());
    let c = c.then(|(s, i, j)| Value((s, i, j)));
    assert_eq!(c.unpack().into_value(), Some((("a", 1, 2),)));
}

/// 4. `any(ready(1), later(2)).then(|x| x)` where `later` defers past
/// `ready`: handler called once with `1`.
#[test]
fn scenario_4_any_prefers_the_already_ready_operand() {
    let later = make_continuable(|p: continuable::Promise<i32>| p.set_value(2));
    let c = make_ready(1) | later;
    let c = c.then(Value);
    assert_eq!(c.unpack().into_value(), Some((1,)));
}

/// 5. `seq(ready(1), ready(2), ready(3)).then(|a,b,c| ...)`: handler called
/// once with `(1,2,3)`, operand producers run in order.
#[test]
fn scenario_5_seq_runs_in_order_and_merges() {
    let order = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let (o1, o2, o3) = (order.clone(), order.clone(), order.clone());
    let a = make_continuable(move |p: continuable::Promise<(i32,)>| {
        o1.lock().unwrap().push(1);
        p.set_value((1,));
    });
    let b = make_continuable(move |p: continuable::Promise<(i32,)>| {
        o2.lock().unwrap().push(2);
        p.set_value((2,));
    });
    let c3 = make_continuable(move |p: continuable::Promise<(i32,)>| {
        o3.lock().unwrap().push(3);
        p.set_value((3,));
    });
    let c = (a >> b) >> c3;
    let c = c.then(|(a, b, c)| Value((a, b, c)));
    assert_eq!(c.unpack().into_value(), Some(((1, 2, 3),)));
    assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
}

/// 6. `ready(1).then(|x| empty_result{})` -> terminal: neither the value
/// handler nor the error handler runs (silent abort).
#[test]
fn scenario_6_empty_result_aborts_silently() {
    let value_ran = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let error_ran = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let (v2, e2) = (value_ran.clone(), error_ran.clone());

    let c: continuable::Continuation<()> = make_ready((1,)).then(|(_x,)| empty_result());
    let c = c.next(move |completion| {
        match completion {
            Completion::Value(_) => v2.store(true, std::sync::atomic::Ordering::SeqCst),
            Completion::Exception(_) => e2.store(true, std::sync::atomic::Ordering::SeqCst),
        }
        Value(())
    });
    c.done();

    assert!(!value_ran.load(std::sync::atomic::Ordering::SeqCst));
    assert!(!error_ran.load(std::sync::atomic::Ordering::SeqCst));
}

/// 7. `all(ready(1), cancelling()).fail(|e| !bool(e) ? OK : FAIL)`: fail
/// handler runs with a falsy (cancellation) Error.
#[test]
fn scenario_7_all_propagates_cancellation_to_fail_handler() {
    let c = make_ready((1,)) & make_cancelling::<()>();
    let c = c.fail(|e| {
        assert!(e.is_cancellation());
        Value(())
    });
    assert!(c.unpack().is_value());
}

/// 8. `make_continuable(|p| p.set_value(5)).then(|x| x+1).then(|x| x*2)`:
/// downstream receives `12`.
#[test]
fn scenario_8_chained_then_calls() {
    let c = make_continuable(|p: continuable::Promise<(i32,)>| p.set_value((5,)))
        .then(|(x,)| Value(x + 1))
        .then(|(x,)| Value(x * 2));
    assert_eq!(c.unpack().into_value(), Some((12,)));
}

/// 9. `map_pack(dup, 1, vec![2,3])` where `dup(x) = spread_this(x,x)`:
/// tuple-like result `(1, 1, vec![2, 2, 3, 3])`.
///
/// One mapper (`Dup`), implementing `Mapper<i32>` directly, handles the
/// whole mixed leaf-and-container pack in a single `map_pack` call: the
/// bare leaf `1` goes through `Dup`'s own impl, and `vec![2, 3]` goes
/// through the blanket `Mapper<Vec<i32>>` that `continuable-core` derives
/// for any type already implementing `Mapper<i32>`, flattening each
/// element's `Spread` into the rebuilt vector.
#[test]
fn scenario_9_map_pack_spreads_and_rebuilds_containers() {
    use continuable_core::spread::Spread;
    use continuable_core::traverse::{map_pack, Cons, Mapper, Nil};

    struct Dup;
    impl Mapper<i32> for Dup {
        type Output = Spread<(i32, i32)>;
        fn map(&mut self, leaf: i32) -> Spread<(i32, i32)> {
            Spread((leaf, leaf))
        }
    }

    let result = map_pack((1, vec![2, 3]), &mut Dup);
    let Cons(a, Cons(b, Cons(rest, Nil))) = result;
    assert_eq!((a, b), (1, 1));
    assert_eq!(rest, vec![2, 2, 3, 3]);
}

/// 10. Construct `c`, move it into a composition, let the original binding
/// go out of scope: the original's destructor must be a no-op (ownership
/// moved, not duplicated).
#[test]
fn scenario_10_move_into_composition_has_no_double_drain() {
    let ran = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let ran2 = ran.clone();
    let c = make_continuable(move |p: continuable::Promise<(i32,)>| {
        ran2.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        p.set_value((1,));
    });

    // Moving `c` into a composition must not trigger its own destructor;
    // only the composition's eventual drive does.
    let composed = c & make_ready((2,));
    composed.done();

    assert_eq!(ran.load(std::sync::atomic::Ordering::SeqCst), 1);
}
