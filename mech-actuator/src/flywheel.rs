//! Par de flywheels acionados juntos

use serde::{Deserialize, Serialize};
use crate::error::ActuatorResult;
use crate::motor::Actuator;

/// Configuração do par
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlywheelConfig {
    /// Velocidade padrão (normalizada)
    pub speed: f64,
}

impl Default for FlywheelConfig {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

/// Dois atuadores girando juntos na mesma direção do mecanismo.
///
/// A correção de inversão é aplicada uma única vez, pelo próprio
/// [`Actuator`].
#[derive(Debug, Clone)]
pub struct FlywheelPair {
    first: Actuator,
    second: Actuator,
    config: FlywheelConfig,
}

impl FlywheelPair {
    /// Cria par com velocidade padrão `speed`
    pub fn new(first: Actuator, second: Actuator, speed: f64) -> Self {
        Self {
            first,
            second,
            config: FlywheelConfig { speed },
        }
    }

    /// Velocidade padrão
    pub fn speed(&self) -> f64 {
        self.config.speed
    }

    /// Gira para frente (`speed` sobrescreve a velocidade padrão)
    pub fn run_forward(&self, speed: Option<f64>) -> ActuatorResult<()> {
        let speed = speed.unwrap_or(self.config.speed);
        self.set_both(speed)
    }

    /// Gira para trás (`speed` sobrescreve a velocidade padrão)
    pub fn run_backward(&self, speed: Option<f64>) -> ActuatorResult<()> {
        let speed = speed.unwrap_or(self.config.speed);
        self.set_both(-speed)
    }

    /// Para os dois motores
    pub fn stop(&self) -> ActuatorResult<()> {
        self.set_both(0.0)
    }

    fn set_both(&self, value: f64) -> ActuatorResult<()> {
        self.first.set_output(value)?;
        self.second.set_output(value)
    }
}
