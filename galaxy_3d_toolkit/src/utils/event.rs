/// Ordered list of notification subscribers.
///
/// Handlers are invoked in subscription order. Each subscription gets a
/// unique, never-recycled id so a stale id can never remove someone else's
/// handler.
///
/// # Example
///
/// ```ignore
/// let mut on_resize = EventHandlers::<(u32, u32)>::new();
/// let id = on_resize.subscribe(|(w, h)| println!("{}x{}", w, h));
/// on_resize.emit(&(800, 600));
/// on_resize.unsubscribe(id);
/// ```
pub struct EventHandlers<T> {
    handlers: Vec<(SubscriptionId, Box<dyn FnMut(&T) + Send>)>,
    next_id: u64,
}

/// Handle returned by `EventHandlers::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl<T> EventHandlers<T> {
    /// Create an empty subscriber list
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a handler
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Invoke every handler with `payload`
    pub fn emit(&mut self, payload: &T) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(payload);
        }
    }

    /// Drop all handlers
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for EventHandlers<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
