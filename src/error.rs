use thiserror::Error;

/// Outcome of an operation that was rejected without touching the heap.
///
/// Extracting from an empty heap is not an error; it yields `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeapError<E> {
    /// The element is already queued. The rejected element is handed back.
    #[error("element is already queued")]
    DuplicateElement(E),
    #[error("element is not queued")]
    ElementNotFound,
}

impl<E> HeapError<E> {
    /// Recovers the element of a rejected insert, if any.
    pub fn into_element(self) -> Option<E> {
        match self {
            HeapError::DuplicateElement(element) => Some(element),
            HeapError::ElementNotFound => None,
        }
    }
}
