//! One-shot named timers with at most one live timer per role,
//! armed/cancelled against a generation token so a timer racing a cancel
//! can never fire its completion event.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::events::PanelEvent;

/// The three cancellable timer roles the panel arms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Exit,
    Entry,
    Siren,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    live: bool,
}

/// Owns the timer primitives for all three roles. Cheaply cloneable; every
/// clone shares the same underlying slot table.
#[derive(Clone)]
pub struct TimerManager {
    slots: Arc<Mutex<HashMap<Role, Slot>>>,
    events: UnboundedSender<PanelEvent>,
}

impl TimerManager {
    pub fn new(events: UnboundedSender<PanelEvent>) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            events,
        }
    }

    /// Arm a new timer for `role`, implicitly cancelling any existing
    /// timer of the same role first. When `duration` elapses without an
    /// intervening cancel, `event` is pushed onto the dispatch queue.
    pub fn schedule(&self, role: Role, duration: Duration, event: PanelEvent) {
        self.cancel(role);
        let generation = {
            let mut slots = self.slots.lock().unwrap();
            let slot = slots.entry(role).or_default();
            slot.live = true;
            slot.generation
        };

        let slots = Arc::clone(&self.slots);
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;

            let fires = {
                let mut slots = slots.lock().unwrap();
                match slots.get_mut(&role) {
                    Some(slot) if slot.generation == generation && slot.live => {
                        slot.live = false;
                        true
                    }
                    _ => false,
                }
            };

            if fires {
                // The receiver outliving every sender is the only way this
                // send can fail, which only happens during shutdown.
                let _ = events.send(event);
            } else {
                debug!(?role, "timer fired after cancellation; ignored");
            }
        });
    }

    /// Cancel any live timer for `role`. A no-op on an absent or
    /// already-fired timer. Returns whether a live timer was actually
    /// cancelled, so the state machine can log accurately.
    pub fn cancel(&self, role: Role) -> bool {
        let mut slots = self.slots.lock().unwrap();
        let slot = slots.entry(role).or_default();
        slot.generation += 1;
        std::mem::take(&mut slot.live)
    }

    /// Cancel all three timers — used on shutdown.
    pub fn cancel_all(&self) {
        for role in [Role::Exit, Role::Entry, Role::Siren] {
            self.cancel(role);
        }
    }

    /// Whether a timer of this role is currently live. Exposed so callers
    /// can assert the at-most-one-live-timer-per-role invariant in tests.
    pub fn is_live(&self, role: Role) -> bool {
        self.slots
            .lock()
            .unwrap()
            .get(&role)
            .map(|slot| slot.live)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    fn manager() -> (TimerManager, mpsc::UnboundedReceiver<PanelEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (TimerManager::new(tx), rx)
    }

    #[tokio::test]
    async fn schedule_fires_after_duration() {
        let (mgr, mut rx) = manager();
        mgr.schedule(Role::Exit, Duration::from_millis(10), PanelEvent::SirenExpired);
        assert!(mgr.is_live(Role::Exit));

        let event = timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timer should have fired")
            .unwrap();
        assert_eq!(event, PanelEvent::SirenExpired);
        assert!(!mgr.is_live(Role::Exit));
    }

    #[tokio::test]
    async fn cancel_before_fire_suppresses_event() {
        let (mgr, mut rx) = manager();
        mgr.schedule(Role::Entry, Duration::from_millis(50), PanelEvent::SirenExpired);
        let was_live = mgr.cancel(Role::Entry);
        assert!(was_live);
        assert!(!mgr.is_live(Role::Entry));

        let result = timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(result.is_err(), "cancelled timer must not emit its event");
    }

    #[tokio::test]
    async fn cancel_on_absent_timer_is_noop_returning_false() {
        let (mgr, _rx) = manager();
        assert!(!mgr.cancel(Role::Siren));
    }

    #[tokio::test]
    async fn cancel_on_already_fired_timer_is_noop() {
        let (mgr, mut rx) = manager();
        mgr.schedule(Role::Siren, Duration::from_millis(5), PanelEvent::SirenExpired);
        rx.recv().await.unwrap();
        assert!(!mgr.cancel(Role::Siren));
    }

    #[tokio::test]
    async fn schedule_implicitly_cancels_prior_timer_of_same_role() {
        let (mgr, mut rx) = manager();
        mgr.schedule(
            Role::Exit,
            Duration::from_millis(10),
            PanelEvent::EntryExpired {
                sensor: "first".to_string(),
            },
        );
        mgr.schedule(
            Role::Exit,
            Duration::from_millis(30),
            PanelEvent::EntryExpired {
                sensor: "second".to_string(),
            },
        );

        let event = timeout(Duration::from_millis(200), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            event,
            PanelEvent::EntryExpired {
                sensor: "second".to_string()
            }
        );

        // Confirm the first timer's generation was invalidated and never
        // produced a second event.
        let second = timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn cancel_all_suppresses_every_role() {
        let (mgr, mut rx) = manager();
        mgr.schedule(Role::Exit, Duration::from_millis(20), PanelEvent::SirenExpired);
        mgr.schedule(Role::Entry, Duration::from_millis(20), PanelEvent::SirenExpired);
        mgr.schedule(Role::Siren, Duration::from_millis(20), PanelEvent::SirenExpired);
        mgr.cancel_all();

        let result = timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(result.is_err());
    }
}
