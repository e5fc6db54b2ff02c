//! Flat iteration over every jet of every event.

use std::iter::FusedIterator;

use tp_core::{EventBuffer, EventSource, JetRecord, Result};

/// Builds a record from jet `index` of a buffered event.
pub type JetConverter<B> = fn(&B, usize) -> Result<JetRecord>;

/// Finite, non-restartable stream of jet records.
///
/// Events are read in order and every jet of an event is produced before the
/// next event is loaded. The first error ends the stream.
pub struct JetStream<'a, S: EventSource> {
    source: &'a mut S,
    convert: JetConverter<S::Buffer>,
    n_events: usize,
    next_event: usize,
    jet: usize,
    n_jets: usize,
    total_jets: usize,
    finished: bool,
}

impl<'a, S: EventSource> JetStream<'a, S> {
    /// Stream the first `max_events` events (all if `None`).
    pub fn new(
        source: &'a mut S,
        convert: JetConverter<S::Buffer>,
        max_events: Option<usize>,
    ) -> Self {
        let size = source.size();
        let n_events = max_events.map_or(size, |m| m.min(size));
        Self {
            source,
            convert,
            n_events,
            next_event: 0,
            jet: 0,
            n_jets: 0,
            total_jets: 0,
            finished: false,
        }
    }

    /// Events the stream will visit.
    pub fn n_events(&self) -> usize {
        self.n_events
    }

    /// Events loaded so far.
    pub fn events_read(&self) -> usize {
        self.next_event
    }

    /// Jets reported by the events loaded so far.
    pub fn total_jets(&self) -> usize {
        self.total_jets
    }
}

impl<S: EventSource> Iterator for JetStream<'_, S> {
    type Item = Result<JetRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            if self.jet < self.n_jets {
                let jet = (self.convert)(self.source.buffer(), self.jet);
                self.jet += 1;
                if jet.is_err() {
                    self.finished = true;
                }
                return Some(jet);
            }
            if self.next_event >= self.n_events {
                self.finished = true;
                break;
            }
            if let Err(e) = self.source.seek(self.next_event) {
                self.finished = true;
                return Some(Err(e));
            }
            self.next_event += 1;
            self.jet = 0;
            self.n_jets = self.source.buffer().n_jets();
            self.total_jets += self.n_jets;
        }
        None
    }
}

impl<S: EventSource> FusedIterator for JetStream<'_, S> {}
