use std::ops::BitOr;

/// The two-bit ownership state piggybacked onto every `Continuation` handle
/// (spec §3).
///
/// - `acquired` starts `true` and flips to `false` exactly once, via
///   [`Ownership::release`].
/// - `frozen` blocks the automatic terminal dispatch on drop; it is set by
///   [`Ownership::freeze`] while a continuation is held inside a
///   composition and never unset.
///
/// Rust's move semantics already make a moved-from `Continuation`
/// inaccessible, so unlike the source language this token only needs to
/// describe the *live* handle — there is no "moved-from" state to track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ownership {
    acquired: bool,
    frozen: bool,
}

impl Ownership {
    /// A freshly constructed, acquired and unfrozen token.
    pub fn new() -> Self {
        Ownership {
            acquired: true,
            frozen: false,
        }
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Flips `acquired` to `false`. Idempotent per spec invariant 8 would
    /// assert on a double release; we assert that here since a second
    /// release is a programming error (the handle was already drained).
    pub fn release(&mut self) {
        debug_assert!(self.acquired, "Ownership::release() called twice");
        self.acquired = false;
    }

    /// Sets `frozen`. Idempotent: `freeze(); freeze();` equals `freeze();`.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }
}

impl Default for Ownership {
    fn default() -> Self {
        Ownership::new()
    }
}

/// Combines two tokens: `acquired` is the conjunction, `frozen` the
/// disjunction (spec §3 — used when aggregating operands into a
/// composition).
impl BitOr for Ownership {
    type Output = Ownership;

    fn bitor(self, rhs: Ownership) -> Ownership {
        Ownership {
            acquired: self.acquired && rhs.acquired,
            frozen: self.frozen || rhs.frozen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_acquired_and_unfrozen() {
        let t = Ownership::new();
        assert!(t.is_acquired());
        assert!(!t.is_frozen());
    }

    #[test]
    fn release_flips_acquired() {
        let mut t = Ownership::new();
        t.release();
        assert!(!t.is_acquired());
    }

    #[test]
    fn freeze_is_idempotent() {
        let mut t = Ownership::new();
        t.freeze();
        t.freeze();
        assert!(t.is_frozen());
    }

    #[test]
    fn bitor_combines() {
        let mut a = Ownership::new();
        let mut b = Ownership::new();
        b.freeze();
        let combined = a | b;
        assert!(combined.is_acquired());
        assert!(combined.is_frozen());

        a.release();
        let combined = a | b;
        assert!(!combined.is_acquired());
        assert!(combined.is_frozen());
    }

    #[test]
    #[should_panic]
    fn double_release_asserts() {
        let mut t = Ownership::new();
        t.release();
        t.release();
    }
}
