//! Actor capability and the coordinator rendezvous
//!
//! Every actor exchanges exactly one proceed/acknowledge pair with the
//! coordinator per phase it takes part in. Actors never wait on each other.
//!
//! ```text
//!  Coordinator                         Actor thread
//!  ───────────                         ────────────
//!  release(tick) ── Signal::Tick ───►  on_tick(tick, state)
//!  await_ack()   ◄──── Ack ──────────  acknowledge
//!  ...
//!  stop()        ── Signal::Stop ───►  return actor
//! ```
//!
//! An actor that reports itself retired when it acknowledges leaves its loop
//! right after that acknowledgement, without waiting for `Signal::Stop`.
//!
//! Both directions are single-slot (`bounded(1)`) channels, so at most one
//! signal is ever in flight per actor.

use crate::simulation::SimulationState;
use crate::types::Tick;
use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::trace;

/// Tick-local behavior shared by customers and tellers
pub trait Actor: Send {
    /// Human readable name, used for thread names and errors
    fn label(&self) -> String;

    /// Perform this actor's work for `tick`
    fn on_tick(&mut self, tick: Tick, state: &SimulationState);

    /// Whether the actor has nothing left to do and may be retired
    fn is_retired(&self) -> bool {
        false
    }
}

/// Coordinator-to-actor signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Run the tick-local step for this tick
    Tick(Tick),
    /// Terminate at the phase boundary
    Stop,
}

/// Actor-to-coordinator acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// Tick whose step has completed
    pub tick: Tick,
}

/// The coordinator's end of one actor's rendezvous
#[derive(Debug)]
pub(crate) struct PhaseLink {
    proceed: Sender<Signal>,
    ack: Receiver<Ack>,
}

/// The actor's end of its rendezvous
#[derive(Debug)]
pub(crate) struct ActorPort {
    proceed: Receiver<Signal>,
    ack: Sender<Ack>,
}

/// Link disconnected; the actor thread has gone away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Disconnected;

/// Create a connected coordinator/actor pair
pub(crate) fn rendezvous() -> (PhaseLink, ActorPort) {
    let (proceed_tx, proceed_rx) = bounded(1);
    let (ack_tx, ack_rx) = bounded(1);
    (PhaseLink { proceed: proceed_tx, ack: ack_rx }, ActorPort { proceed: proceed_rx, ack: ack_tx })
}

impl PhaseLink {
    /// Let the actor run its step for `tick`
    pub(crate) fn release(&self, tick: Tick) -> Result<(), Disconnected> {
        self.proceed.send(Signal::Tick(tick)).map_err(|_| Disconnected)
    }

    /// Block until the actor acknowledges its step
    pub(crate) fn await_ack(&self) -> Result<Ack, Disconnected> {
        self.ack.recv().map_err(|_| Disconnected)
    }

    /// Tell the actor to terminate. A gone actor is already terminated.
    pub(crate) fn stop(&self) {
        let _ = self.proceed.send(Signal::Stop);
    }
}

/// Drive `actor` from its port until stopped or disconnected, then hand it back
pub(crate) fn run_actor<A: Actor>(mut actor: A, port: ActorPort, state: &SimulationState) -> A {
    while let Ok(signal) = port.proceed.recv() {
        match signal {
            Signal::Tick(tick) => {
                actor.on_tick(tick, state);
                // Sampled before the ack: afterwards other phases may run.
                let retired = actor.is_retired();
                if port.ack.send(Ack { tick }).is_err() || retired {
                    break;
                }
            }
            Signal::Stop => break,
        }
    }
    trace!(actor = %actor.label(), "actor terminated");
    actor
}
