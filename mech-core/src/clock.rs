//! Fonte de tempo monotônica injetável
//!
//! Controladores nunca consultam um relógio oculto: quem precisa medir
//! duração recebe um [`Clock`] na construção.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Relógio monotônico
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Tempo decorrido desde uma origem arbitrária e fixa
    fn now(&self) -> Duration;
}

/// Relógio de parede baseado em [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Cria relógio com origem no instante atual
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Relógio avançado manualmente (testes e simulação).
///
/// Clones compartilham o mesmo tempo.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Cria relógio parado em zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Avança o relógio
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Define o tempo absoluto
    pub fn set(&self, to: Duration) {
        let nanos = u64::try_from(to.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.store(nanos, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}
