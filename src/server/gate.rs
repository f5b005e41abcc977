//! # Compuerta de Concurrencia
//! src/server/gate.rs
//!
//! Semáforo contador que limita cuántas conexiones se procesan a la vez.
//! El acceptor pide un permiso por cada conexión aceptada; si no hay
//! slots libres se bloquea (backpressure), nunca rechaza.
//!
//! El permiso se libera en su `Drop`, así que cualquier salida del worker
//! (éxito, error o panic) devuelve el slot.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Semáforo contador con `Mutex` + `Condvar`
#[derive(Debug)]
pub struct ConcurrencyGate {
    /// Workers activos en este momento
    active: Mutex<usize>,

    /// Notifica cuando se libera un slot
    released: Condvar,

    capacity: usize,
}

impl ConcurrencyGate {
    /// Crea una compuerta con `capacity` slots (mínimo 1)
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            active: Mutex::new(0),
            released: Condvar::new(),
            capacity: capacity.max(1),
        })
    }

    /// Toma un slot, bloqueando hasta que haya uno libre
    pub fn acquire(self: &Arc<Self>) -> GatePermit {
        let mut active = self.lock();

        while *active >= self.capacity {
            active = self
                .released
                .wait(active)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *active += 1;

        GatePermit {
            gate: Arc::clone(self),
        }
    }

    /// Slots ocupados ahora mismo
    pub fn active(&self) -> usize {
        *self.lock()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn release(&self) {
        let mut active = self.lock();
        *active = active.saturating_sub(1);
        self.released.notify_one();
    }

    // El contador no puede quedar inconsistente, así que un lock
    // envenenado se sigue usando.
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Slot ocupado en la compuerta; se libera al hacer drop
#[derive(Debug)]
pub struct GatePermit {
    gate: Arc<ConcurrencyGate>,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.gate.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_acquire_and_release() {
        let gate = ConcurrencyGate::new(2);

        let first = gate.acquire();
        let second = gate.acquire();
        assert_eq!(gate.active(), 2);

        drop(first);
        assert_eq!(gate.active(), 1);
        drop(second);
        assert_eq!(gate.active(), 0);
    }

    #[test]
    fn test_zero_capacity_becomes_one() {
        let gate = ConcurrencyGate::new(0);
        assert_eq!(gate.capacity(), 1);
    }

    #[test]
    fn test_acquire_blocks_until_release() {
        let gate = ConcurrencyGate::new(1);
        let held = gate.acquire();
        let admitted = Arc::new(AtomicBool::new(false));

        let waiter = thread::spawn({
            let gate = Arc::clone(&gate);
            let admitted = Arc::clone(&admitted);
            move || {
                let _permit = gate.acquire();
                admitted.store(true, Ordering::SeqCst);
            }
        });

        thread::sleep(Duration::from_millis(100));
        assert!(!admitted.load(Ordering::SeqCst));

        drop(held);
        waiter.join().unwrap();
        assert!(admitted.load(Ordering::SeqCst));
        assert_eq!(gate.active(), 0);
    }

    #[test]
    fn test_permit_released_on_panic() {
        let gate = ConcurrencyGate::new(1);

        let worker = thread::spawn({
            let permit = gate.acquire();
            move || {
                let _permit = permit;
                panic!("worker failure");
            }
        });

        assert!(worker.join().is_err());
        assert_eq!(gate.active(), 0);
    }
}
