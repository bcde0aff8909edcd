//! Driver simulado em memória
//!
//! Registra cada comando recebido. Clones compartilham o mesmo estado, então o
//! teste mantém um clone após mover o driver para dentro de um [`Actuator`].
//!
//! [`Actuator`]: crate::Actuator

use std::sync::{Arc, Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use mech_core::traits::{DriverError, DriverResult, MotorDriver, NeutralMode};
use crate::types::MotorDirection;

/// Estado interno do driver simulado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedState {
    /// Saída atual (já no espaço de fiação)
    pub output: f64,
    /// Direção atual
    pub direction: MotorDirection,
    /// Modo neutro atual
    pub neutral_mode: NeutralMode,
    /// Total de comandos de saída executados
    pub commands: u64,
    /// Histórico de saídas comandadas
    pub history: Vec<f64>,
    /// Falha injetada: todo comando falha enquanto presente
    #[serde(skip)]
    pub fault: Option<DriverError>,
}

impl SimulatedState {
    /// Cria novo estado
    pub fn new() -> Self {
        Self {
            output: 0.0,
            direction: MotorDirection::Stopped,
            neutral_mode: NeutralMode::Brake,
            commands: 0,
            history: Vec::new(),
            fault: None,
        }
    }
}

impl Default for SimulatedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Driver de motor simulado
#[derive(Debug, Clone, Default)]
pub struct SimulatedDriver {
    state: Arc<Mutex<SimulatedState>>,
}

impl SimulatedDriver {
    /// Cria driver parado, em modo freio
    pub fn new() -> Self {
        Self::default()
    }

    // Um teste que entrou em pânico com o lock não invalida a leitura
    fn state(&self) -> MutexGuard<'_, SimulatedState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cópia do estado interno
    pub fn snapshot(&self) -> SimulatedState {
        self.state().clone()
    }

    /// Histórico de saídas comandadas
    pub fn history(&self) -> Vec<f64> {
        self.state().history.clone()
    }

    /// Última saída comandada (`None` se nunca comandado)
    pub fn last_command(&self) -> Option<f64> {
        self.state().history.last().copied()
    }

    /// Número de comandos de saída
    pub fn command_count(&self) -> u64 {
        self.state().commands
    }

    /// Modo neutro atual
    pub fn neutral_mode(&self) -> NeutralMode {
        self.state().neutral_mode
    }

    /// Direção atual
    pub fn direction(&self) -> MotorDirection {
        self.state().direction
    }

    /// Faz todos os comandos seguintes falharem com `err`
    pub fn inject_fault(&self, err: DriverError) {
        self.state().fault = Some(err);
    }

    /// Remove falha injetada
    pub fn clear_fault(&self) {
        self.state().fault = None;
    }

    /// Esquece o histórico sem alterar a saída atual
    pub fn clear_history(&self) {
        let mut state = self.state();
        state.history.clear();
        state.commands = 0;
    }
}

impl MotorDriver for SimulatedDriver {
    fn set_output(&mut self, value: f64) -> DriverResult<()> {
        let mut state = self.state();
        if let Some(err) = &state.fault {
            return Err(err.clone());
        }

        state.output = value;
        state.direction = MotorDirection::of(value);
        state.history.push(value);
        state.commands += 1;
        Ok(())
    }

    fn output(&self) -> f64 {
        self.state().output
    }

    fn set_neutral_mode(&mut self, mode: NeutralMode) -> DriverResult<()> {
        let mut state = self.state();
        if let Some(err) = &state.fault {
            return Err(err.clone());
        }
        state.neutral_mode = mode;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_state_new() {
        let state = SimulatedState::new();
        assert_eq!(state.output, 0.0);
        assert_eq!(state.direction, MotorDirection::Stopped);
        assert_eq!(state.neutral_mode, NeutralMode::Brake);
    }

    #[test]
    fn test_clone_shares_state() {
        let probe = SimulatedDriver::new();
        let mut driver = probe.clone();

        driver.set_output(0.5).unwrap();
        driver.set_output(-0.25).unwrap();

        assert_eq!(probe.history(), vec![0.5, -0.25]);
        assert_eq!(probe.command_count(), 2);
        assert_eq!(probe.direction(), MotorDirection::Reverse);
        assert_eq!(driver.output(), -0.25);
    }

    #[test]
    fn test_injected_fault() {
        let mut driver = SimulatedDriver::new();
        driver.inject_fault(DriverError::Disconnected);

        assert_eq!(driver.set_output(0.1), Err(DriverError::Disconnected));
        assert_eq!(driver.set_neutral_mode(NeutralMode::Coast), Err(DriverError::Disconnected));
        assert_eq!(driver.command_count(), 0);

        driver.clear_fault();
        assert!(driver.set_output(0.1).is_ok());
    }

    #[test]
    fn test_neutral_mode_switch() {
        let mut driver = SimulatedDriver::new();
        driver.set_neutral_mode(NeutralMode::Coast).unwrap();
        assert_eq!(driver.neutral_mode(), NeutralMode::Coast);
    }
}
