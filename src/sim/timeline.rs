//! Deferred actions on the simulation timeline
//!
//! Delays are measured in fixed simulation ticks, so deferred work runs on the
//! same clock as physics. `invalidate()` drops everything scheduled so far;
//! entries from an older generation never fire.

/// A pending action
#[derive(Debug, Clone)]
struct Scheduled<T> {
    due_tick: u64,
    seq: u64,
    generation: u64,
    payload: T,
}

#[derive(Debug, Clone)]
pub struct Timeline<T> {
    now: u64,
    generation: u64,
    next_seq: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            generation: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current tick
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Run `payload` after `delay_ticks` ticks (0 = on the next advance)
    pub fn schedule(&mut self, delay_ticks: u64, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due_tick: self.now + delay_ticks,
            seq,
            generation: self.generation,
            payload,
        });
    }

    /// Drop every pending action and start a new generation
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.pending.clear();
    }

    /// Advance one tick and return the actions now due, in scheduling order
    pub fn advance(&mut self) -> Vec<T> {
        self.now += 1;
        let now = self.now;
        let generation = self.generation;

        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .filter(|s| s.generation == generation)
            .partition(|s| s.due_tick <= now);
        self.pending = rest;

        due.sort_by_key(|s| (s.due_tick, s.seq));
        due.into_iter().map(|s| s.payload).collect()
    }
}
