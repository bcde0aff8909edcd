//! Reset sem freio
//!
//! Coloca os atuadores em roda livre por um intervalo para que o mecanismo
//! assente no batente físico. Ao terminar, executa a ação de reset de cada
//! atuador (tipicamente zerar o encoder), na ordem da lista.

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use mech_actuator::Actuator;
use mech_core::clock::Clock;
use mech_core::traits::{Command, MechComponent, NeutralMode};
use crate::error::{ControlError, ControlResult};

/// Atuador e a ação executada ao fim do intervalo em roda livre
pub struct ResetPair {
    actuator: Actuator,
    action: Box<dyn FnMut() + Send>,
}

impl ResetPair {
    pub fn new<F>(actuator: Actuator, action: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self {
            actuator,
            action: Box::new(action),
        }
    }

    pub fn actuator(&self) -> &Actuator {
        &self.actuator
    }
}

impl std::fmt::Debug for ResetPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetPair")
            .field("actuator", &self.actuator.name())
            .finish_non_exhaustive()
    }
}

/// Comando de reset sem freio
#[derive(Debug)]
pub struct BrakelessReset {
    duration: Duration,
    pairs: Vec<ResetPair>,
    clock: Arc<dyn Clock>,
    started_at: Option<Duration>,
}

impl BrakelessReset {
    /// Cria o comando; lista vazia é falha de configuração
    pub fn new(duration: Duration, pairs: Vec<ResetPair>, clock: Arc<dyn Clock>) -> ControlResult<Self> {
        if pairs.is_empty() {
            return Err(ControlError::InvalidConfig(
                "brakeless reset needs at least one actuator".into(),
            ));
        }
        Ok(Self {
            duration,
            pairs,
            clock,
            started_at: None,
        })
    }

    /// Duração em roda livre
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Tempo decorrido desde `initialize` (zero antes disso)
    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|start| self.clock.now().saturating_sub(start))
            .unwrap_or(Duration::ZERO)
    }
}

impl Command for BrakelessReset {
    type Error = ControlError;

    fn initialize(&mut self) -> ControlResult<()> {
        for pair in &self.pairs {
            pair.actuator.set_neutral_mode(NeutralMode::Coast)?;
        }
        self.started_at = Some(self.clock.now());
        debug!(count = self.pairs.len(), duration = ?self.duration, "brakeless reset started");
        Ok(())
    }

    fn execute(&mut self) -> ControlResult<()> {
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.started_at.is_some() && self.elapsed() >= self.duration
    }

    fn end(&mut self, interrupted: bool) -> ControlResult<()> {
        self.started_at = None;
        for pair in &mut self.pairs {
            (pair.action)();
        }
        debug!(interrupted, "brakeless reset finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use mech_actuator::SimulatedDriver;
    use mech_core::clock::ManualClock;

    #[test]
    fn test_rejects_empty_pairs() {
        let clock = Arc::new(ManualClock::new());
        assert!(matches!(
            BrakelessReset::new(Duration::from_secs(1), vec![], clock),
            Err(ControlError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_coasts_then_runs_actions_in_order() {
        let clock = ManualClock::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let probes = [SimulatedDriver::new(), SimulatedDriver::new()];

        let pairs = probes
            .iter()
            .enumerate()
            .map(|(i, probe)| {
                let order = Arc::clone(&order);
                ResetPair::new(Actuator::new(probe.clone(), false), move || {
                    order.lock().unwrap().push(i)
                })
            })
            .collect();

        let mut reset =
            BrakelessReset::new(Duration::from_millis(500), pairs, Arc::new(clock.clone())).unwrap();
        assert!(!reset.is_finished());

        reset.initialize().unwrap();
        assert!(probes.iter().all(|p| p.neutral_mode() == NeutralMode::Coast));

        clock.advance(Duration::from_millis(499));
        reset.execute().unwrap();
        assert!(!reset.is_finished());

        clock.advance(Duration::from_millis(1));
        assert!(reset.is_finished());

        reset.end(false).unwrap();
        assert_eq!(*order.lock().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_actions_run_when_interrupted() {
        let clock = ManualClock::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let pair = ResetPair::new(Actuator::new(SimulatedDriver::new(), false), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut reset = BrakelessReset::new(Duration::from_secs(3), vec![pair], Arc::new(clock)).unwrap();
        reset.initialize().unwrap();
        reset.end(true).unwrap();

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(reset.elapsed(), Duration::ZERO);
    }
}
