//! Deadline-bounded racer calls.
//!
//! The racer runs on its own OS thread so a hung racer ties up neither the
//! tokio workers nor runtime shutdown. The answer travels back over a
//! oneshot channel; once the deadline passes the receiver is dropped and a
//! late answer is discarded together with the racer.

use crate::error::DecisionError;
use crate::racer::Racer;
use rubiks_puzzle::Cube;
use std::thread;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, instrument};

/// Starting board handed to [`Racer::init`] on the first try.
pub(crate) struct Opening {
    pub cubes: Vec<Cube>,
    pub goal: Vec<Cube>,
}

/// A racer's answer, with the racer handed back for the next try.
pub(crate) struct Decision {
    pub racer: Box<dyn Racer>,
    pub index: usize,
}

/// Asks `racer` for its next move, giving up after `deadline`.
///
/// `opening` is passed to [`Racer::init`] first, inside the same deadline.
#[instrument(skip(racer, opening), fields(racer = %racer.name(), init = opening.is_some()))]
pub(crate) async fn request(
    mut racer: Box<dyn Racer>,
    opening: Option<Opening>,
    try_count: u32,
    deadline: Duration,
) -> Result<Decision, DecisionError> {
    let (tx, rx) = oneshot::channel();

    thread::Builder::new()
        .name(format!("racer-try-{try_count}"))
        .spawn(move || {
            if let Some(Opening { cubes, goal }) = opening {
                racer.init(&cubes, &goal);
            }
            let index = racer.next(try_count);
            // Fails only when the controller stopped waiting.
            let _ = tx.send(Decision { racer, index });
        })
        .map_err(|source| DecisionError::Spawn { source })?;

    match tokio::time::timeout(deadline, rx).await {
        Ok(Ok(decision)) => {
            debug!(index = decision.index, "Racer answered");
            Ok(decision)
        }
        Ok(Err(_)) => Err(DecisionError::Abandoned),
        Err(_) => Err(DecisionError::Timeout { after: deadline }),
    }
}
