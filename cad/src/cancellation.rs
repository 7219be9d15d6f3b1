//! Cooperative cancellation token (§5). Deliberately the one place this
//! workspace's types cross a thread boundary: the engine itself stays
//! single-threaded (§5, "single-threaded cooperative throughout"), but a
//! driver may cancel it from a timer thread, so the flag needs `Send + Sync`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// A borrow-free poll closure suitable for [`ratcad_rings::root_isolator::real_roots_cancellable`]
    /// and [`ratcad_rings::RealAlgebraicNumber::refine_to_cancellable`].
    pub fn poll(&self) -> impl Fn() -> bool + '_ {
        move || self.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uncancelled_and_latches_once_cancelled() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }
}
