//! Bounded inbound-command mailbox for `no_std` environments.
//!
//! Built on `critical-section` and `heapless::Deque`, so the network
//! collaborator may enqueue requests from an interrupt or a second
//! execution context while the cooperative main loop drains them.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::{Deque, Vec};

/// Maximum accepted command payload size in bytes.
pub const MAX_COMMAND_PAYLOAD: usize = 192;

/// Error returned to the sender when the mailbox is full.
///
/// Carries the rejected message back; dropping it is acceptable, the
/// last command applied wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelFull<T>(pub T);

/// A bounded, interrupt-safe message queue.
pub struct Channel<T, const CAP: usize> {
    inner: Mutex<RefCell<Deque<T, CAP>>>,
}

impl<T, const CAP: usize> Channel<T, CAP> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle; multiple senders share the same queue.
    pub const fn sender(&self) -> Sender<'_, T, CAP> {
        Sender { channel: self }
    }

    /// Get a receiver handle for draining the queue.
    pub const fn receiver(&self) -> Receiver<'_, T, CAP> {
        Receiver { channel: self }
    }

    /// Enqueue a message, handing it back if the queue is full.
    pub fn send(&self, message: T) -> Result<(), ChannelFull<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(message).map_err(ChannelFull)
        })
    }

    /// Dequeue the oldest pending message, if any. Never blocks.
    pub fn receive(&self) -> Option<T> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front()
        })
    }

    pub fn is_empty(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().is_empty())
    }
}

impl<T, const CAP: usize> Default for Channel<T, CAP> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sender handle for a [`Channel`].
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const CAP: usize> {
    channel: &'a Channel<T, CAP>,
}

impl<T, const CAP: usize> Sender<'_, T, CAP> {
    /// Enqueue a message, handing it back if the queue is full.
    pub fn send(&self, message: T) -> Result<(), ChannelFull<T>> {
        self.channel.send(message)
    }
}

/// Receiver handle for a [`Channel`].
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const CAP: usize> {
    channel: &'a Channel<T, CAP>,
}

impl<T, const CAP: usize> Receiver<'_, T, CAP> {
    /// Dequeue the oldest pending message, if any. Never blocks.
    pub fn receive(&self) -> Option<T> {
        self.channel.receive()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

/// Raw command bytes plus an opaque response destination.
///
/// `T` identifies where the acknowledgement should go (an address, a
/// message id, a socket handle); this crate never inspects it.
#[derive(Debug, Clone)]
pub struct CommandRequest<T> {
    pub payload: Vec<u8, MAX_COMMAND_PAYLOAD>,
    pub reply_to: T,
}

impl<T> CommandRequest<T> {
    /// Build a request from raw bytes.
    ///
    /// Returns `None` when the payload exceeds [`MAX_COMMAND_PAYLOAD`].
    pub fn from_slice(bytes: &[u8], reply_to: T) -> Option<Self> {
        let payload = Vec::from_slice(bytes).ok()?;
        Some(Self { payload, reply_to })
    }
}

/// Type alias for the inbound command channel.
pub type CommandChannel<T, const CAP: usize> = Channel<CommandRequest<T>, CAP>;

/// Type alias for the command sender handle.
pub type CommandSender<'a, T, const CAP: usize> = Sender<'a, CommandRequest<T>, CAP>;

/// Type alias for the command receiver handle.
pub type CommandReceiver<'a, T, const CAP: usize> = Receiver<'a, CommandRequest<T>, CAP>;
