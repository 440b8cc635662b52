//! A per-thread message queue.
//!
//! The thread that owns a [`Looper`] decides when posted messages run by pumping it with
//! [`Looper::poll`] or [`Looper::run_until`]. Any thread holding a [`Handler`] can post to it.

use std::{
    cell::RefCell,
    marker::PhantomData,
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError},
    thread::{self, ThreadId},
    time::{Duration, Instant},
};

use crate::Error;

type Message = Box<dyn FnOnce() + Send + 'static>;

thread_local! {
    static CURRENT: RefCell<Option<Handler>> = const { RefCell::new(None) };
}

/// The receiving end of a thread message queue, it cannot leave the thread that prepared it.
pub struct Looper {
    receiver: Receiver<Message>,
    handler: Handler,
    _not_send: PhantomData<*const ()>,
}

/// A cloneable handle to post messages on a [`Looper`]
#[derive(Clone, Debug)]
pub struct Handler {
    sender: Sender<Message>,
    thread: ThreadId,
}

impl Looper {
    /// Install a message queue on the current thread
    pub fn prepare() -> Result<Self, Error> {
        CURRENT.with(|current| {
            let mut current = current.borrow_mut();
            if current.is_some() {
                return Err(Error::LooperAlreadyPrepared);
            }
            let (sender, receiver) = mpsc::channel();
            let handler = Handler {
                sender,
                thread: thread::current().id(),
            };
            *current = Some(handler.clone());
            Ok(Looper {
                receiver,
                handler,
                _not_send: PhantomData,
            })
        })
    }

    pub fn handler(&self) -> Handler {
        self.handler.clone()
    }

    /// Run the messages already queued without waiting, returns how many ran
    pub fn poll(&self) -> usize {
        let mut count = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(message) => {
                    message();
                    count += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return count,
            }
        }
    }

    /// Run messages as they arrive until `done` returns true or `timeout` elapses.
    ///
    /// Returns the last value of `done`. A `timeout` too large to be represented waits forever.
    pub fn run_until(&self, timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        while !done() {
            let received = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    self.receiver.recv_timeout(deadline - now)
                }
                None => self
                    .receiver
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(message) => message(),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return done()
                }
            }
        }
        true
    }
}

impl Drop for Looper {
    fn drop(&mut self) {
        // try_with: the thread local may already be gone if dropped during thread teardown
        let _ = CURRENT.try_with(|current| current.borrow_mut().take());
    }
}

impl Handler {
    /// The handler of the looper prepared on the current thread, if any
    pub fn current() -> Option<Handler> {
        CURRENT.with(|current| current.borrow().clone())
    }

    /// Enqueue `message` to be run on the looper thread
    pub fn post(&self, message: impl FnOnce() + Send + 'static) -> Result<(), Error> {
        self.sender
            .send(Box::new(message))
            .map_err(|_| Error::LooperGone)
    }

    /// The thread owning the looper
    pub fn thread(&self) -> ThreadId {
        self.thread
    }

    pub fn is_current_thread(&self) -> bool {
        thread::current().id() == self.thread
    }
}
