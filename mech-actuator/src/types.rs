//! Tipos de dados para atuadores

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTROLLER_ID: AtomicU64 = AtomicU64::new(1);

/// Identidade de um controlador que pode reivindicar atuadores.
///
/// Cada chamada a [`ControllerId::next`] gera um valor único no processo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControllerId(u64);

impl ControllerId {
    /// Aloca um novo identificador
    pub fn next() -> Self {
        Self(NEXT_CONTROLLER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Constrói a partir de um valor bruto (telemetria, testes)
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Valor bruto
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ControllerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direção do motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorDirection {
    Forward,
    Reverse,
    Stopped,
}

impl MotorDirection {
    /// Direção correspondente a uma saída normalizada
    pub fn of(output: f64) -> Self {
        if output > 0.0 {
            MotorDirection::Forward
        } else if output < 0.0 {
            MotorDirection::Reverse
        } else {
            MotorDirection::Stopped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_ids_unique() {
        let a = ControllerId::next();
        let b = ControllerId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_motor_direction_of() {
        assert_eq!(MotorDirection::of(0.4), MotorDirection::Forward);
        assert_eq!(MotorDirection::of(-0.4), MotorDirection::Reverse);
        assert_eq!(MotorDirection::of(0.0), MotorDirection::Stopped);
    }
}
