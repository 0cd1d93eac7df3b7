use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Counts outstanding background tasks so a caller can block until all finish.
#[derive(Debug, Clone, Default)]
pub struct WaitGroup {
    inner: Arc<(Mutex<usize>, Condvar)>,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, tasks: usize) {
        *self.count() += tasks;
    }

    pub fn done(&self) {
        let (_, cvar) = &*self.inner;
        let mut outstanding = self.count();
        if *outstanding == 0 {
            tracing::warn!("wait group marked done with no outstanding tasks");
            return;
        }
        *outstanding -= 1;
        if *outstanding == 0 {
            cvar.notify_all();
        }
    }

    /// Registers one task; dropping the guard marks it done on every exit path.
    pub fn enter(&self) -> WaitGroupGuard {
        self.add(1);
        WaitGroupGuard { group: self.clone() }
    }

    pub fn outstanding(&self) -> usize {
        *self.count()
    }

    pub fn wait(&self) {
        let (_, cvar) = &*self.inner;
        let mut outstanding = self.count();
        while *outstanding > 0 {
            outstanding = cvar
                .wait(outstanding)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn count(&self) -> MutexGuard<'_, usize> {
        let (lock, _) = &*self.inner;
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug)]
pub struct WaitGroupGuard {
    group: WaitGroup,
}

impl Drop for WaitGroupGuard {
    fn drop(&mut self) {
        self.group.done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn wait_returns_immediately_without_tasks() {
        let group = WaitGroup::new();
        group.wait();
        assert_eq!(group.outstanding(), 0);
    }

    #[test]
    fn guard_marks_done_on_drop() {
        let group = WaitGroup::new();
        let guard = group.enter();
        assert_eq!(group.outstanding(), 1);

        drop(guard);
        assert_eq!(group.outstanding(), 0);
    }

    #[test]
    fn guard_marks_done_when_task_panics() {
        let group = WaitGroup::new();
        let guard = group.enter();
        let handle = std::thread::spawn(move || {
            let _guard = guard;
            panic!("task failed");
        });

        assert!(handle.join().is_err());
        group.wait();
        assert_eq!(group.outstanding(), 0);
    }

    #[test]
    fn done_without_outstanding_tasks_does_not_underflow() {
        let group = WaitGroup::new();
        group.done();
        assert_eq!(group.outstanding(), 0);
    }

    #[test]
    fn wait_blocks_until_all_tasks_finish() {
        let group = WaitGroup::new();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let guards = (0..3).map(|_| group.enter()).collect::<Vec<_>>();
        let worker = std::thread::spawn(move || {
            let _ = release_rx.recv();
            drop(guards);
        });

        let (waited_tx, waited_rx) = mpsc::channel::<()>();
        let waiter = {
            let group = group.clone();
            std::thread::spawn(move || {
                group.wait();
                let _ = waited_tx.send(());
            })
        };

        assert!(waited_rx.recv_timeout(Duration::from_millis(50)).is_err());
        assert_eq!(group.outstanding(), 3);

        release_tx.send(()).expect("worker should be listening");
        waited_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("waiter should be released");
        worker.join().expect("worker should finish");
        waiter.join().expect("waiter should finish");
    }
}
