use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::iter;

use crate::error::SerialError;
use crate::write::{WriteAction, XmlSink};

/// A lazy, single-pass sequence of [`WriteAction`]s.
///
/// Nothing is computed until the sequence is pulled. Failures of nested
/// values appear as `Err` items where the value would have been written.
/// The sequence cannot be restarted: drain it once, in order.
pub struct WriteSequence<'a>(Box<dyn Iterator<Item = Result<WriteAction, SerialError>> + 'a>);

impl<'a> WriteSequence<'a> {
    /// Wraps an iterator of actions.
    #[inline]
    pub fn new(iter: impl Iterator<Item = Result<WriteAction, SerialError>> + 'a) -> Self {
        Self(Box::new(iter))
    }

    /// A sequence that writes nothing.
    #[inline]
    pub fn empty() -> Self {
        Self::new(iter::empty())
    }

    /// A sequence that yields a single error.
    #[inline]
    pub fn failed(error: SerialError) -> Self {
        Self::new(iter::once(Err(error)))
    }

    /// A sequence over already computed actions.
    #[inline]
    pub fn from_actions(actions: Vec<WriteAction>) -> Self {
        Self::new(actions.into_iter().map(Ok))
    }

    /// Drains the sequence into a vector, stopping at the first error.
    #[inline]
    pub fn collect_actions(self) -> Result<Vec<WriteAction>, SerialError> {
        self.collect()
    }

    /// Drains the sequence into `sink`, stopping at the first error.
    pub fn drain_into(self, sink: &mut dyn XmlSink) -> Result<(), SerialError> {
        for action in self {
            action?.apply(sink)?;
        }
        Ok(())
    }
}

impl Iterator for WriteSequence<'_> {
    type Item = Result<WriteAction, SerialError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl fmt::Debug for WriteSequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteSequence").finish_non_exhaustive()
    }
}

impl<'a> From<Result<WriteSequence<'a>, SerialError>> for WriteSequence<'a> {
    #[inline]
    fn from(value: Result<WriteSequence<'a>, SerialError>) -> Self {
        value.unwrap_or_else(WriteSequence::failed)
    }
}
