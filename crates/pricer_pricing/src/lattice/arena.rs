//! Reusable working memory for lattice pricing.
//!
//! [`LatticeArena`] owns one contiguous `f64` buffer and carves it into three
//! disjoint windows of length `steps + 1` per call:
//!
//! ```text
//! [ underlying (n+1) | option values (n+1) | dividend schedule (n+1) ]
//! ```
//!
//! # Design Goals
//!
//! - **Zero allocation in hot path**: the buffer is reused across calls
//! - **Explicit ownership**: the caller (or one rayon worker) owns the arena;
//!   `acquire` takes `&mut self`, so two calls can never share it
//! - **Explicit policy**: growth is either allowed ([`ArenaPolicy::Grow`]) or
//!   refused with [`PricingError::ResourceExhausted`] ([`ArenaPolicy::Fixed`])
//! - **Statistics tracking**: monitor reuse across sweeps
//!
//! Windows are handed out with whatever the previous call left in them. The
//! lattice engine overwrites every slot it reads, so nothing leaks between
//! calls.
//!
//! # Example
//!
//! ```rust
//! use pricer_pricing::lattice::LatticeArena;
//!
//! let mut arena = LatticeArena::new();
//!
//! {
//!     let windows = arena.acquire(100).unwrap();
//!     assert_eq!(windows.underlying.len(), 101);
//!     assert_eq!(windows.option_values.len(), 101);
//!     assert_eq!(windows.dividend_schedule.len(), 101);
//! }
//!
//! // A smaller lattice reuses the same allocation
//! let _ = arena.acquire(50).unwrap();
//! assert_eq!(arena.stats().growths, 1);
//! assert_eq!(arena.stats().allocations_avoided, 1);
//! ```

use pricer_core::types::PricingError;
use tracing::{debug, warn};

/// Number of windows carved from the buffer per call.
const WINDOWS: usize = 3;

/// What the arena does when a call needs more room than it holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArenaPolicy {
    /// Grow to the required size before handing out any window.
    #[default]
    Grow,
    /// Never grow implicitly; fail with [`PricingError::ResourceExhausted`].
    Fixed,
}

/// Statistics about arena usage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Total number of `acquire` calls that succeeded.
    pub acquisitions: usize,
    /// Number of times the buffer had to grow.
    pub growths: usize,
    /// Number of acquisitions served from existing memory.
    pub allocations_avoided: usize,
    /// Number of acquisitions refused by a fixed arena.
    pub refusals: usize,
}

impl ArenaStats {
    /// Returns the fraction of acquisitions served without allocating (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.acquisitions == 0 {
            0.0
        } else {
            self.allocations_avoided as f64 / self.acquisitions as f64
        }
    }
}

/// The three working windows for one pricing call.
#[derive(Debug)]
pub struct LatticeWindows<'a> {
    /// Dividend-free underlying values of the active lattice slice.
    pub underlying: &'a mut [f64],
    /// Option values of the active lattice slice.
    pub option_values: &'a mut [f64],
    /// Escrowed dividend value per step.
    pub dividend_schedule: &'a mut [f64],
}

/// Reusable buffer supplying lattice working windows.
///
/// # Memory Management
///
/// The buffer grows as needed (under [`ArenaPolicy::Grow`]) but never
/// shrinks on its own. Call [`reset`](Self::reset) between sweeps to release
/// it, or [`resize_for`](Self::resize_for) to pre-size it.
#[derive(Clone, Debug, Default)]
pub struct LatticeArena {
    buffer: Vec<f64>,
    policy: ArenaPolicy,
    stats: ArenaStats,
}

impl LatticeArena {
    /// Creates an empty growing arena.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a growing arena pre-sized for lattices of up to `steps` steps.
    ///
    /// If the buffer cannot be allocated the arena starts empty, and the
    /// failure surfaces as an error from [`acquire`](Self::acquire).
    pub fn with_capacity(steps: usize) -> Self {
        let mut arena = Self::new();
        if let Some(slots) = slots_for(steps) {
            if arena.grow_to(slots).is_err() {
                warn!(steps, slots, "could not pre-size lattice arena");
            }
        }
        arena
    }

    /// Creates a non-growing arena able to price lattices of up to `steps` steps.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pricer_core::types::PricingError;
    /// use pricer_pricing::lattice::LatticeArena;
    ///
    /// let mut arena = LatticeArena::fixed(10);
    /// assert!(arena.acquire(10).is_ok());
    /// assert!(matches!(
    ///     arena.acquire(11),
    ///     Err(PricingError::ResourceExhausted { required: 36, available: 33 })
    /// ));
    /// ```
    pub fn fixed(steps: usize) -> Self {
        Self {
            policy: ArenaPolicy::Fixed,
            ..Self::with_capacity(steps)
        }
    }

    /// Returns the growth policy.
    #[inline]
    pub fn policy(&self) -> ArenaPolicy {
        self.policy
    }

    /// Returns the number of `f64` slots currently held.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Largest step count servable without growing, if any.
    pub fn max_steps(&self) -> Option<usize> {
        match self.buffer.len() / WINDOWS {
            0 | 1 => None,
            width => Some(width - 1),
        }
    }

    /// Returns a snapshot of usage statistics.
    #[inline]
    pub fn stats(&self) -> ArenaStats {
        self.stats.clone()
    }

    /// Returns total memory held by the buffer in bytes.
    #[inline]
    pub fn memory_usage(&self) -> usize {
        self.buffer.capacity() * std::mem::size_of::<f64>()
    }

    /// Explicitly sizes the arena for lattices of up to `steps` steps.
    ///
    /// Allowed under both policies; only implicit growth inside
    /// [`acquire`](Self::acquire) is governed by the policy. Never shrinks.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidArgument`] if `steps` is 0 or the slot count
    ///   overflows `usize`
    /// - [`PricingError::ResourceExhausted`] if the allocation fails
    pub fn resize_for(&mut self, steps: usize) -> Result<(), PricingError> {
        let required = required_slots(steps)?;
        self.grow_to(required)
    }

    /// Releases the buffer, keeping the policy and statistics.
    ///
    /// A fixed arena must be [`resize_for`](Self::resize_for)d again before use.
    pub fn reset(&mut self) {
        self.buffer = Vec::new();
    }

    /// Carves three windows of length `steps + 1` out of the buffer.
    ///
    /// Growth, if any, happens before a window is handed out, and the returned
    /// borrows keep the arena locked until they are dropped.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidArgument`] if `steps` is 0
    /// - [`PricingError::ResourceExhausted`] if the arena is
    ///   [`ArenaPolicy::Fixed`] and smaller than `3 * (steps + 1)`, or if
    ///   growing it fails to allocate
    pub fn acquire(&mut self, steps: usize) -> Result<LatticeWindows<'_>, PricingError> {
        let required = required_slots(steps)?;

        if self.buffer.len() < required {
            match self.policy {
                ArenaPolicy::Grow => {
                    debug!(
                        from = self.buffer.len(),
                        to = required,
                        steps,
                        "growing lattice arena"
                    );
                    self.grow_to(required)?;
                    self.stats.growths += 1;
                }
                ArenaPolicy::Fixed => {
                    self.stats.refusals += 1;
                    return Err(PricingError::ResourceExhausted {
                        required,
                        available: self.buffer.len(),
                    });
                }
            }
        } else {
            self.stats.allocations_avoided += 1;
        }
        self.stats.acquisitions += 1;

        let width = steps + 1;
        let (underlying, rest) = self.buffer[..required].split_at_mut(width);
        let (option_values, dividend_schedule) = rest.split_at_mut(width);

        Ok(LatticeWindows {
            underlying,
            option_values,
            dividend_schedule,
        })
    }

    /// Grows the buffer to at least `required` slots without aborting on
    /// allocation failure.
    fn grow_to(&mut self, required: usize) -> Result<(), PricingError> {
        let len = self.buffer.len();
        if len >= required {
            return Ok(());
        }
        self.buffer
            .try_reserve_exact(required - len)
            .map_err(|_| PricingError::ResourceExhausted {
                required,
                available: len,
            })?;
        self.buffer.resize(required, 0.0);
        Ok(())
    }
}

fn slots_for(steps: usize) -> Option<usize> {
    steps.checked_add(1)?.checked_mul(WINDOWS)
}

fn required_slots(steps: usize) -> Result<usize, PricingError> {
    if steps == 0 {
        return Err(PricingError::invalid("steps must be >= 1"));
    }
    slots_for(steps).ok_or_else(|| {
        PricingError::invalid(format!("steps {} overflow the arena size", steps))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_are_disjoint_and_sized() {
        let mut arena = LatticeArena::new();
        let windows = arena.acquire(4).unwrap();
        windows.underlying.fill(1.0);
        windows.option_values.fill(2.0);
        windows.dividend_schedule.fill(3.0);

        assert_eq!(windows.underlying, &[1.0; 5]);
        assert_eq!(windows.option_values, &[2.0; 5]);
        assert_eq!(windows.dividend_schedule, &[3.0; 5]);
        assert_eq!(arena.capacity(), 15);
    }

    #[test]
    fn test_arena_grows_but_does_not_shrink() {
        let mut arena = LatticeArena::with_capacity(4);
        assert_eq!(arena.capacity(), 15);

        let _ = arena.acquire(9).unwrap();
        assert_eq!(arena.capacity(), 30);

        let _ = arena.acquire(2).unwrap();
        assert_eq!(arena.capacity(), 30);
        assert_eq!(arena.max_steps(), Some(9));

        let stats = arena.stats();
        assert_eq!(stats.acquisitions, 2);
        assert_eq!(stats.growths, 1);
        assert_eq!(stats.allocations_avoided, 1);
        assert!((stats.hit_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_buffer_reused_across_calls() {
        let mut arena = LatticeArena::with_capacity(1000);
        let ptr1 = arena.acquire(1000).unwrap().underlying.as_ptr();
        for steps in [10, 500, 1000] {
            let ptr2 = arena.acquire(steps).unwrap().underlying.as_ptr();
            assert_eq!(ptr1, ptr2);
        }
        assert_eq!(arena.stats().growths, 0);
    }

    #[test]
    fn test_fixed_arena_refuses_growth() {
        let mut arena = LatticeArena::fixed(100);
        assert_eq!(arena.policy(), ArenaPolicy::Fixed);

        let err = arena.acquire(101).unwrap_err();
        assert_eq!(
            err,
            PricingError::ResourceExhausted {
                required: 306,
                available: 303,
            }
        );
        assert_eq!(arena.capacity(), 303);
        assert_eq!(arena.stats().refusals, 1);

        assert!(arena.acquire(100).is_ok());
    }

    #[test]
    fn test_fixed_arena_explicit_resize() {
        let mut arena = LatticeArena::fixed(10);
        arena.resize_for(20).unwrap();
        assert!(arena.acquire(20).is_ok());
        assert_eq!(arena.policy(), ArenaPolicy::Fixed);
    }

    #[test]
    fn test_reset_releases_memory() {
        let mut arena = LatticeArena::with_capacity(10_000);
        assert!(arena.memory_usage() >= 30_003 * 8);

        arena.reset();
        assert_eq!(arena.capacity(), 0);
        assert_eq!(arena.max_steps(), None);

        // A growing arena recovers transparently
        assert!(arena.acquire(10).is_ok());
    }

    #[test]
    fn test_reset_fixed_arena_then_acquire_fails() {
        let mut arena = LatticeArena::fixed(10);
        arena.reset();
        assert!(matches!(
            arena.acquire(1),
            Err(PricingError::ResourceExhausted {
                required: 6,
                available: 0
            })
        ));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let mut arena = LatticeArena::new();
        assert!(matches!(
            arena.acquire(0),
            Err(PricingError::InvalidArgument(_))
        ));
        assert!(arena.resize_for(0).is_err());
        assert!(arena.acquire(usize::MAX).is_err());
    }

    #[test]
    fn test_unallocatable_steps_reported_not_aborted() {
        let steps = 1usize << 60;
        let required = (steps + 1) * 3;

        let mut arena = LatticeArena::new();
        assert_eq!(
            arena.acquire(steps).unwrap_err(),
            PricingError::ResourceExhausted {
                required,
                available: 0,
            }
        );
        assert_eq!(arena.stats().growths, 0);
        assert_eq!(arena.stats().acquisitions, 0);

        assert!(matches!(
            arena.resize_for(steps),
            Err(PricingError::ResourceExhausted { .. })
        ));

        // Pre-sizing falls back to an empty arena
        let arena = LatticeArena::with_capacity(steps);
        assert_eq!(arena.capacity(), 0);

        // Still usable afterwards
        let mut arena = LatticeArena::with_capacity(10);
        let _ = arena.acquire(steps);
        assert!(arena.acquire(10).is_ok());
        assert_eq!(arena.capacity(), 33);
    }

    #[test]
    fn test_arena_moves_between_threads() {
        let mut arena = LatticeArena::with_capacity(10);
        let handle = std::thread::spawn(move || {
            let _ = arena.acquire(10).unwrap();
            arena
        });
        let arena = handle.join().unwrap();
        assert_eq!(arena.stats().acquisitions, 1);
    }
}
