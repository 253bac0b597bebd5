use std::rc::Rc;

use super::hlist::{Cons, Nil};

/// What a [`Visitor`] decides after looking at one leaf: keep walking
/// immediately, or detach and hand the leaf back for storage.
pub enum VisitOutcome<L> {
    /// Keep walking the rest of the pack synchronously.
    Continue,
    /// The visitor will resume the walk later; it gets the leaf back to
    /// hold onto meanwhile.
    Detach(L),
}

/// A callable that continues a detached traversal from where it left off.
///
/// Mirrors spec §4.1's `resume` callable: it closes over the remaining,
/// not-yet-visited suffix of the pack plus a strong reference to the
/// visitor, so the frame stays alive independently of the stack that made
/// the original `traverse_pack_async` call.
pub struct Resume(Box<dyn FnOnce()>);

impl Resume {
    fn new(f: impl FnOnce() + 'static) -> Self {
        Resume(Box::new(f))
    }

    /// Continues the traversal from the saved position.
    ///
    /// Precondition (spec §9, Open Question 2): at most one resumer drives
    /// a given detached frame at a time. This crate does not enforce that
    /// concurrently — a single-threaded cooperative caller is assumed.
    pub fn call(self) {
        (self.0)()
    }
}

/// Visits leaves of type `L` during an asynchronous pack traversal
/// (spec §4.1).
pub trait Visitor<L> {
    /// Synchronous visit: `Continue` to keep walking, or `Detach(leaf)` to
    /// suspend (the traversal then calls [`Visitor::detach`] with the same
    /// leaf and a [`Resume`]).
    fn visit(&mut self, leaf: L) -> VisitOutcome<L>;

    /// Called once, right after `visit` returned `Detach`. The visitor is
    /// expected to store `resume` and invoke it once ready.
    fn detach(&mut self, leaf: L, resume: Resume);
}

/// Called once the whole pack has been exhausted with no pending detach.
pub trait VisitorComplete {
    fn complete(&mut self);
}

/// Drives an asynchronous, suspendable walk over a heterogeneous list,
/// visiting each leaf left to right and suspending at any leaf whose
/// visitor requests a detach (spec §4.1).
///
/// `V` must be `'static` since a detaching visitor's continuation
/// (the [`Resume`] closure) may outlive the calling stack frame.
pub trait TraverseAsync<V> {
    fn traverse(self, visitor: Rc<std::cell::RefCell<V>>);
}

impl<V: VisitorComplete> TraverseAsync<V> for Nil {
    fn traverse(self, visitor: Rc<std::cell::RefCell<V>>) {
        visitor.borrow_mut().complete();
    }
}

impl<Head, Tail, V> TraverseAsync<V> for Cons<Head, Tail>
where
    Head: 'static,
    Tail: TraverseAsync<V> + 'static,
    V: Visitor<Head> + 'static,
{
    fn traverse(self, visitor: Rc<std::cell::RefCell<V>>) {
        let Cons(head, tail) = self;
        let outcome = visitor.borrow_mut().visit(head);
        match outcome {
            VisitOutcome::Continue => tail.traverse(visitor),
            VisitOutcome::Detach(leaf) => {
                let visitor_for_resume = visitor.clone();
                let resume = Resume::new(move || tail.traverse(visitor_for_resume));
                visitor.borrow_mut().detach(leaf, resume);
            }
        }
    }
}

/// Entry point: walks `list`, dispatching to `visitor`, one leaf at a time
/// with the ability to detach and resume later (spec §4.1's asynchronous
/// traversal) — the one-leaf-at-a-time counterpart to [`super::map_pack`],
/// which maps every leaf in one synchronous pass.
///
/// This is a standalone public primitive for callers who want to drive a
/// heterogeneous pack with their own [`Visitor`]; `continuable::compose`'s
/// `all`/`any`/`seq` do not route their own operand-wait suspension through
/// it (see DESIGN.md) — each operand there is already an independent
/// callback-based continuation, not a shared traversal cursor.
pub fn traverse_pack_async<L, V>(list: L, visitor: Rc<std::cell::RefCell<V>>)
where
    L: TraverseAsync<V>,
{
    list.traverse(visitor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traverse::hlist::AsHList;
    use std::cell::RefCell;

    #[derive(Default)]
    struct CollectAll {
        seen: Vec<i32>,
        completed: bool,
    }

    impl Visitor<i32> for CollectAll {
        fn visit(&mut self, leaf: i32) -> VisitOutcome<i32> {
            self.seen.push(leaf);
            VisitOutcome::Continue
        }

        fn detach(&mut self, _leaf: i32, _resume: Resume) {
            unreachable!("this visitor never detaches")
        }
    }

    impl VisitorComplete for CollectAll {
        fn complete(&mut self) {
            self.completed = true;
        }
    }

    #[test]
    fn visits_every_leaf_in_order_and_completes_once() {
        let visitor = Rc::new(RefCell::new(CollectAll::default()));
        traverse_pack_async((1, 2, 3).into_hlist(), visitor.clone());
        assert_eq!(visitor.borrow().seen, vec![1, 2, 3]);
        assert!(visitor.borrow().completed);
    }

    struct DetachOnce {
        seen: Vec<i32>,
        detached_on: Option<i32>,
        pending: Option<Resume>,
        completed: bool,
    }

    impl Visitor<i32> for DetachOnce {
        fn visit(&mut self, leaf: i32) -> VisitOutcome<i32> {
            if self.detached_on.is_none() && leaf == 2 {
                VisitOutcome::Detach(leaf)
            } else {
                self.seen.push(leaf);
                VisitOutcome::Continue
            }
        }

        fn detach(&mut self, leaf: i32, resume: Resume) {
            self.seen.push(leaf);
            self.detached_on = Some(leaf);
            self.pending = Some(resume);
        }
    }

    impl VisitorComplete for DetachOnce {
        fn complete(&mut self) {
            self.completed = true;
        }
    }

    #[test]
    fn detach_suspends_and_resume_continues() {
        let visitor = Rc::new(RefCell::new(DetachOnce {
            seen: Vec::new(),
            detached_on: None,
            pending: None,
            completed: false,
        }));
        traverse_pack_async((1, 2, 3).into_hlist(), visitor.clone());

        assert_eq!(visitor.borrow().seen, vec![1]);
        assert!(!visitor.borrow().completed);

        let resume = visitor.borrow_mut().pending.take().unwrap();
        resume.call();

        assert_eq!(visitor.borrow().seen, vec![1, 2, 3]);
        assert!(visitor.borrow().completed);
    }
}
