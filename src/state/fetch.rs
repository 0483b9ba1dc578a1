/// Per-screen fetch slot
///
/// Every screen that asks the model for something keeps exactly one of
/// these. `Loading` doubles as the flag that disables the submit button,
/// and carries the ticket of the request it is waiting for.

/// Identifies one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Hands out tickets, never the same one twice
#[derive(Debug, Default)]
pub struct Tickets {
    last: u64,
}

impl Tickets {
    pub fn issue(&mut self) -> Ticket {
        self.last += 1;
        Ticket(self.last)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Idle,
    Loading(Ticket),
    Ready(T),
    Failed,
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Fetch::Idle
    }
}

impl<T> Fetch<T> {
    /// `Ready` for `Some`, `Failed` for `None`
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Fetch::Ready(value),
            None => Fetch::Failed,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Fetch::Loading(_))
    }

    /// Store the outcome of request `ticket`
    ///
    /// Returns false, leaving the slot untouched, unless the slot is
    /// still waiting for exactly that request.
    pub fn settle(&mut self, ticket: Ticket, value: Option<T>) -> bool {
        match self {
            Fetch::Loading(pending) if *pending == ticket => {
                *self = Fetch::from_option(value);
                true
            }
            _ => false,
        }
    }
}
