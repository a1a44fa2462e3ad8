//! Type-erased, read-only snapshots of the elements a step consumed.
//!
//! Steps in one history see elements of different types (`String` before a
//! parse, `i64` after it). The graph only ever needs a display string per
//! element plus the element type name, so the snapshot erases everything else.
//! The element storage is shared with the view that owned it; nothing is
//! formatted until [`ElementSnapshot::describe`] is called.

use std::fmt;
use std::rc::Rc;

use crate::type_name::short_type_name;

/// Display capability over an indexed collection of elements.
trait DisplayElements {
    fn len(&self) -> usize;
    fn describe(&self, index: usize) -> Option<String>;
}

impl<T: fmt::Debug> DisplayElements for Vec<T> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn describe(&self, index: usize) -> Option<String> {
        self.get(index).map(|element| format!("{element:?}"))
    }
}

/// A single shared value viewed as a one-element collection.
struct SharedValue<T>(Rc<T>);

impl<T: fmt::Debug> DisplayElements for SharedValue<T> {
    fn len(&self) -> usize {
        1
    }

    fn describe(&self, index: usize) -> Option<String> {
        (index == 0).then(|| format!("{:?}", self.0))
    }
}

#[derive(Clone)]
pub struct ElementSnapshot {
    elements: Rc<dyn DisplayElements>,
    type_name: String,
}

impl ElementSnapshot {
    /// Snapshot a shared sequence without copying it.
    #[must_use]
    pub fn of_sequence<T: fmt::Debug + 'static>(elements: &Rc<Vec<T>>) -> Self {
        let elements: Rc<dyn DisplayElements> = Rc::clone(elements) as Rc<dyn DisplayElements>;
        Self {
            elements,
            type_name: short_type_name::<T>(),
        }
    }

    /// Snapshot a shared scalar as a one-element collection.
    #[must_use]
    pub fn of_value<T: fmt::Debug + 'static>(value: &Rc<T>) -> Self {
        Self {
            elements: Rc::new(SharedValue(Rc::clone(value))),
            type_name: short_type_name::<T>(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type name captured when the snapshot was taken.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Debug rendering of the element at `index`.
    #[must_use]
    pub fn describe(&self, index: usize) -> Option<String> {
        self.elements.describe(index)
    }

    /// Debug renderings of all elements, in order.
    pub fn descriptions(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.len()).filter_map(|index| self.describe(index))
    }
}

impl fmt::Debug for ElementSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementSnapshot")
            .field("type_name", &self.type_name)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sequence_snapshot_describes_each_element() {
        let elements = Rc::new(vec![String::from("a"), String::from("b")]);
        let snapshot = ElementSnapshot::of_sequence(&elements);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.type_name(), "String");
        assert_eq!(
            snapshot.descriptions().collect::<Vec<_>>(),
            vec![r#""a""#, r#""b""#]
        );
        assert_eq!(snapshot.describe(2), None);
    }

    #[test]
    fn sequence_snapshot_shares_storage() {
        let elements = Rc::new(vec![1, 2, 3]);
        let _snapshot = ElementSnapshot::of_sequence(&elements);
        assert_eq!(Rc::strong_count(&elements), 2);
    }

    #[test]
    fn value_snapshot_is_one_element() {
        let value = Rc::new(Some(42_u8));
        let snapshot = ElementSnapshot::of_value(&value);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.type_name(), "Option<u8>");
        assert_eq!(snapshot.describe(0).as_deref(), Some("Some(42)"));
        assert_eq!(snapshot.describe(1), None);
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = ElementSnapshot::of_sequence(&Rc::new(Vec::<i32>::new()));
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.descriptions().count(), 0);
    }
}
