//! Seams between the aggregation core and the event source.

use crate::Result;

/// One event's worth of raw jet columns.
pub trait EventBuffer: Default {
    /// Raw field names this schema reads.
    const FIELDS: &'static [&'static str];

    /// Record which entry the buffer holds.
    fn set_entry(&mut self, entry: usize);

    /// Entry the buffer holds.
    fn entry(&self) -> usize;

    /// Number of jets the event reports.
    fn n_jets(&self) -> usize;
}

/// Sequential, seekable source of events.
pub trait EventSource {
    /// Buffer type exposed after a seek.
    type Buffer: EventBuffer;

    /// Number of events.
    fn size(&self) -> usize;

    /// Load `event` into the visible buffer.
    fn seek(&mut self, event: usize) -> Result<()>;

    /// The currently loaded event.
    fn buffer(&self) -> &Self::Buffer;
}
