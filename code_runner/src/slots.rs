//! FIFO slot queue capping how many toolchain processes run at once.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

struct QueueState {
    max_concurrent: usize,
    running: usize,
    waiting: VecDeque<Arc<Notify>>,
}

impl QueueState {
    /// Takes a slot if one is free; otherwise enqueues and returns the handle to wait on.
    fn try_acquire_slot(&mut self) -> Option<Arc<Notify>> {
        if self.running < self.max_concurrent {
            self.running += 1;
            None
        } else {
            let notify = Arc::new(Notify::new());
            self.waiting.push_back(notify.clone());
            Some(notify)
        }
    }

    /// Frees a slot, handing it straight to the oldest waiter if there is one.
    fn release_slot(&mut self) {
        self.running = self.running.saturating_sub(1);

        if let Some(waiting_task) = self.waiting.pop_front() {
            self.running += 1;
            waiting_task.notify_one();
        }
    }
}

#[derive(Clone)]
pub struct SlotQueue {
    state: Arc<Mutex<QueueState>>,
}

/// Holds one slot; dropping it releases the slot.
pub struct Slot {
    state: Arc<Mutex<QueueState>>,
}

/// A queued `acquire`. If dropped before it wakes, it leaves the queue, or
/// passes on the slot it was already handed.
struct Waiter {
    state: Arc<Mutex<QueueState>>,
    notify: Arc<Notify>,
    armed: bool,
}

impl Drop for Waiter {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = lock(&self.state);
        match state
            .waiting
            .iter()
            .position(|queued| Arc::ptr_eq(queued, &self.notify))
        {
            Some(index) => {
                state.waiting.remove(index);
            }
            None => state.release_slot(),
        }
    }
}

fn lock(state: &Mutex<QueueState>) -> MutexGuard<'_, QueueState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SlotQueue {
    /// `max_concurrent` is clamped to at least one.
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState {
                max_concurrent: max_concurrent.max(1),
                running: 0,
                waiting: VecDeque::new(),
            })),
        }
    }

    /// Waits (in arrival order) until a slot is free. Cancel-safe: dropping
    /// the future while it waits never leaks a slot.
    pub async fn acquire(&self) -> Slot {
        let maybe_notify = lock(&self.state).try_acquire_slot();

        // Wait outside the lock; release_slot already counted us as running.
        if let Some(notify) = maybe_notify {
            let mut waiter = Waiter {
                state: Arc::clone(&self.state),
                notify,
                armed: true,
            };
            waiter.notify.notified().await;
            waiter.armed = false;
        }

        Slot {
            state: Arc::clone(&self.state),
        }
    }

    pub fn running(&self) -> usize {
        lock(&self.state).running
    }

    pub fn max_concurrent(&self) -> usize {
        lock(&self.state).max_concurrent
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        lock(&self.state).release_slot();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{Duration, sleep};

    #[tokio::test]
    async fn test_slot_released_on_drop() {
        let queue = SlotQueue::new(2);
        let a = queue.acquire().await;
        let _b = queue.acquire().await;
        assert_eq!(queue.running(), 2);
        drop(a);
        assert_eq!(queue.running(), 1);
    }

    #[tokio::test]
    async fn test_zero_is_clamped_to_one() {
        let queue = SlotQueue::new(0);
        assert_eq!(queue.max_concurrent(), 1);
        let _slot = queue.acquire().await;
        assert_eq!(queue.running(), 1);
    }

    #[tokio::test]
    async fn test_never_exceeds_cap() {
        let queue = SlotQueue::new(2);
        let running = Arc::new(AtomicUsize::new(0));
        let max_observed = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..6 {
            let queue = queue.clone();
            let running = running.clone();
            let max_observed = max_observed.clone();
            handles.push(tokio::spawn(async move {
                let _slot = queue.acquire().await;
                let current = running.fetch_add(1, Ordering::SeqCst) + 1;
                max_observed.fetch_max(current, Ordering::SeqCst);
                sleep(Duration::from_millis(50)).await;
                running.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_observed.load(Ordering::SeqCst), 2);
        assert_eq!(queue.running(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_while_queued_leaves_queue() {
        let queue = SlotQueue::new(1);
        let held = queue.acquire().await;

        let gave_up = tokio::time::timeout(Duration::from_millis(20), queue.acquire()).await;
        assert!(gave_up.is_err());

        drop(held);
        assert_eq!(queue.running(), 0);
        let _again = queue.acquire().await;
        assert_eq!(queue.running(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_after_handoff_passes_slot_on() {
        let queue = SlotQueue::new(1);
        let held = queue.acquire().await;

        let mut pending = Box::pin(queue.acquire());
        tokio::select! {
            biased;
            _ = &mut pending => panic!("slot should still be held"),
            _ = tokio::task::yield_now() => {}
        }

        // The slot is handed to the queued waiter, which is then dropped unwoken.
        drop(held);
        assert_eq!(queue.running(), 1);
        drop(pending);
        assert_eq!(queue.running(), 0);

        let _again = queue.acquire().await;
        assert_eq!(queue.running(), 1);
    }
}
