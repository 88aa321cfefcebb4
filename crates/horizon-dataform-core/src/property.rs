//! Change-detecting state cells for controls.
//!
//! A control keeps each piece of state (check state, current index, text) in
//! a [`Property`]. Writing through [`Property::set`] reports whether the value
//! really changed, and the control emits its signal only in that case.
//!
//! # Example
//!
//! ```
//! use horizon_dataform_core::{Property, Signal};
//!
//! struct Toggle {
//!     checked: Property<bool>,
//!     toggled: Signal<bool>,
//! }
//!
//! impl Toggle {
//!     fn set_checked(&self, checked: bool) {
//!         if self.checked.set(checked) {
//!             self.toggled.emit(checked);
//!         }
//!     }
//! }
//!
//! let toggle = Toggle { checked: Property::new(false), toggled: Signal::new() };
//! toggle.set_checked(true);
//! toggle.set_checked(true); // no second emission
//! assert!(toggle.checked.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value behind a read-write lock that detects real changes on write.
///
/// Readers get clones; the lock is never held across a signal emission, so a
/// slot may read the property of the control that notified it.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a property holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// A clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Overwrite the value without comparing, for construction-time setup.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`, returning `true` if it differs from the previous one.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Store `value`, returning the previous value if it differed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        (*current != value).then(|| std::mem::replace(&mut *current, value))
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_real_changes_only() {
        let index = Property::new(-1);
        assert!(!index.set(-1));
        assert!(index.set(2));
        assert_eq!(index.get(), 2);
    }

    #[test]
    fn test_replace_returns_previous() {
        let text = Property::new(String::from("12"));
        assert_eq!(text.replace("12".into()), None);
        assert_eq!(text.replace("125".into()), Some("12".to_string()));
        assert_eq!(text.get(), "125");
    }

    #[test]
    fn test_set_silent_and_debug() {
        let title = Property::<String>::default();
        title.set_silent("offset".into());
        assert_eq!(format!("{title:?}"), "Property(\"offset\")");
    }
}
