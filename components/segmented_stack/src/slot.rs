//! Type-erased storage for stack values.

use std::any::{type_name, Any};
use std::fmt;

/// A value of any `Send` type together with the name of that type.
///
/// The name is recorded when the slot is created so that a failed
/// retrieval can report what was actually stored.
///
/// # Examples
///
/// ```
/// use segmented_stack::Slot;
///
/// let slot = Slot::new(42u8);
/// assert!(slot.is::<u8>());
/// assert_eq!(slot.type_name(), "u8");
///
/// let slot = slot.downcast::<String>().unwrap_err();
/// assert_eq!(slot.downcast::<u8>().unwrap(), 42);
/// ```
pub struct Slot {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Slot {
    /// Box `value` into a new slot.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Slot {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the stored type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns whether the stored value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the stored value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Take the stored value out as a `T`, or get the slot back unchanged.
    pub fn downcast<T: Any>(self) -> Result<T, Slot> {
        let type_name = self.type_name;
        match self.value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Slot { value, type_name }),
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.type_name).finish()
    }
}
