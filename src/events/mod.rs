//! Synchronous, ordered publish/subscribe event system.
//!
//! Every listener receives the same structured [`Event`]: a named, mutable,
//! insertion-ordered payload with a stop flag. Listeners run in registration
//! order; once one calls [`Event::stop`] the remaining listeners for that
//! dispatch are skipped. Listener panics are not caught.

pub mod names;

/// Mutable event passed to every listener of a dispatch.
#[derive(Debug, Clone)]
pub struct Event {
    name: String,
    payload: Vec<(String, String)>,
    stopped: bool,
}

impl Event {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            payload: Vec::new(),
            stopped: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a payload value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.payload
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set or overwrite a payload key. Overwrites keep their position;
    /// new keys append.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.payload.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.payload.push((key.to_string(), value)),
        }
        self
    }

    /// Payload entries in insertion order.
    pub fn payload(&self) -> &[(String, String)] {
        &self.payload
    }

    /// Cancel further listener propagation for this dispatch.
    pub fn stop(&mut self) -> &mut Self {
        self.stopped = true;
        self
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Handle identifying one listener registration, for targeted removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&mut Event)>;

/// Ordered-listener event dispatcher.
///
/// Duplicate registrations for the same event are independent entries and
/// each receives its own [`ListenerId`].
#[derive(Default)]
pub struct Dispatcher {
    listeners: Vec<(String, Vec<(ListenerId, Listener)>)>,
    next_id: u64,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for an event name. Returns a handle usable with
    /// [`Dispatcher::off`].
    pub fn on<F>(&mut self, event_name: &str, listener: F) -> ListenerId
    where
        F: FnMut(&mut Event) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let entry: Listener = Box::new(listener);
        match self.listeners.iter().position(|(n, _)| n == event_name) {
            Some(index) => self.listeners[index].1.push((id, entry)),
            None => self
                .listeners
                .push((event_name.to_string(), vec![(id, entry)])),
        }
        id
    }

    /// Remove one listener by id, or every listener for the name when no id
    /// is given. A name with no listeners left is forgotten entirely.
    pub fn off(&mut self, event_name: &str, listener: Option<ListenerId>) {
        let Some(index) = self.listeners.iter().position(|(n, _)| n == event_name) else {
            return;
        };
        match listener {
            Some(id) => {
                let bucket = &mut self.listeners[index].1;
                bucket.retain(|(registered, _)| *registered != id);
                if bucket.is_empty() {
                    self.listeners.remove(index);
                }
            }
            None => {
                self.listeners.remove(index);
            }
        }
    }

    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.listeners.iter().any(|(n, _)| n == event_name)
    }

    /// Build an [`Event`] from the given payload and dispatch it.
    ///
    /// Returns the event so callers can observe cancellation and payload
    /// mutations made by listeners.
    pub fn emit(&mut self, event_name: &str, payload: &[(&str, &str)]) -> Event {
        let mut event = Event::new(event_name);
        for (key, value) in payload {
            event.set(key, *value);
        }
        self.dispatch(&mut event);
        event
    }

    /// Run all listeners registered for the event's name, in registration
    /// order, halting once the event is stopped.
    pub fn dispatch(&mut self, event: &mut Event) {
        let Some(index) = self
            .listeners
            .iter()
            .position(|(n, _)| n == event.name())
        else {
            return;
        };
        for (_, listener) in &mut self.listeners[index].1 {
            if event.is_stopped() {
                break;
            }
            listener(event);
        }
    }

    /// Remove all listeners for all events.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
