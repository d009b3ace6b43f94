//! Latest-value cells shared between the heading callback and the frame loop
//!
//! The compass and the camera deliver updates on independent paths. Neither
//! needs history: the frame loop only reads the most recent completed heading,
//! and consumers only read the most recent alignment.
//!
//! # Example
//! ```
//! use north_align::{HeadingCell, HeadingSource};
//!
//! let cell = HeadingCell::new();
//! assert_eq!(cell.true_heading(), None);
//!
//! cell.update(370.0).unwrap();
//! assert_eq!(cell.true_heading(), Some(10.0));
//!
//! // The platform reports a negative heading when it has no valid fix
//! cell.update(-1.0).unwrap();
//! assert_eq!(cell.true_heading(), None);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::compass::normalize_heading;
use crate::error::{Error, Result};

/// Bit pattern marking an empty heading cell (a NaN never stored as a heading)
const EMPTY: u32 = u32::MAX;

/// Anything that can report the most recent true heading in degrees
pub trait HeadingSource {
    /// Most recent heading, degrees clockwise from true north in `[0, 360)`
    fn true_heading(&self) -> Option<f32>;
}

/// Lock-free single-slot cell holding the latest compass heading
///
/// One writer (the compass callback) and any number of readers. A reader
/// always sees the most recently completed write; there is no queue.
#[derive(Debug)]
pub struct HeadingCell {
    bits: AtomicU32,
}

impl HeadingCell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self {
            bits: AtomicU32::new(EMPTY),
        }
    }

    /// Store a compass reading
    ///
    /// Readings are wrapped into `[0, 360)`. A negative reading is the
    /// platform's marker for "no valid heading" and empties the cell.
    ///
    /// # Errors
    /// [`Error::NonFiniteHeading`] for NaN or infinite readings; the cell
    /// keeps its previous value.
    pub fn update(&self, degrees: f32) -> Result<()> {
        if !degrees.is_finite() {
            return Err(Error::NonFiniteHeading(degrees));
        }

        if degrees < 0.0 {
            tracing::debug!(degrees, "Heading reported invalid, clearing");
            self.clear();
            return Ok(());
        }

        self.bits
            .store(normalize_heading(degrees).to_bits(), Ordering::Release);
        Ok(())
    }

    /// Empty the cell
    pub fn clear(&self) {
        self.bits.store(EMPTY, Ordering::Release);
    }

    /// Most recent heading, if any
    pub fn latest(&self) -> Option<f32> {
        match self.bits.load(Ordering::Acquire) {
            EMPTY => None,
            bits => Some(f32::from_bits(bits)),
        }
    }
}

impl Default for HeadingCell {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingSource for HeadingCell {
    fn true_heading(&self) -> Option<f32> {
        self.latest()
    }
}

/// A plain reading follows the same rules as [`HeadingCell::update`]:
/// negative or non-finite values mean no heading.
impl HeadingSource for Option<f32> {
    fn true_heading(&self) -> Option<f32> {
        self.filter(|degrees| degrees.is_finite() && *degrees >= 0.0)
            .map(normalize_heading)
    }
}

impl<T: HeadingSource + ?Sized> HeadingSource for Arc<T> {
    fn true_heading(&self) -> Option<f32> {
        (**self).true_heading()
    }
}

/// Guarded single-slot cell for publishing a derived value
///
/// Every [`publish`](Latest::publish) replaces the value and bumps the
/// emission counter, so consumers can tell a fresh emission from one they
/// have already handled.
#[derive(Debug)]
pub struct Latest<T> {
    slot: Mutex<Option<T>>,
    emissions: AtomicU64,
}

impl<T: Copy> Latest<T> {
    /// Create an empty cell
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            emissions: AtomicU64::new(0),
        }
    }

    /// Replace the value
    pub fn publish(&self, value: T) {
        *self.slot.lock() = Some(value);
        self.emissions.fetch_add(1, Ordering::AcqRel);
    }

    /// Empty the cell
    pub fn clear(&self) {
        *self.slot.lock() = None;
    }

    /// Most recent value, if any
    pub fn get(&self) -> Option<T> {
        *self.slot.lock()
    }

    /// Number of values published so far
    pub fn emissions(&self) -> u64 {
        self.emissions.load(Ordering::Acquire)
    }
}

impl<T: Copy> Default for Latest<T> {
    fn default() -> Self {
        Self::new()
    }
}
