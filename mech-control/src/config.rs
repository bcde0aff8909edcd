//! Configuração dos controladores
//!
//! Toda configuração é validada na construção do controlador; nenhuma
//! combinação inválida chega ao laço de controle.

use serde::{Deserialize, Serialize};
use mech_core::config;
use crate::error::{ControlError, ControlResult};

fn check_finite(fields: &[(&str, f64)]) -> ControlResult<()> {
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(ControlError::InvalidConfig(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

fn check_bounds(min_bound: f64, max_bound: f64) -> ControlResult<()> {
    if min_bound > max_bound {
        return Err(ControlError::InvalidConfig(format!(
            "min_bound ({}) > max_bound ({})",
            min_bound, max_bound
        )));
    }
    Ok(())
}

fn check_threshold(threshold: f64) -> ControlResult<()> {
    if threshold < 0.0 {
        return Err(ControlError::InvalidConfig(format!(
            "threshold must be >= 0, got {}",
            threshold
        )));
    }
    Ok(())
}

/// Configuração do controlador de movimento limitado
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveConfig {
    /// Limite inferior do escalar controlado
    pub min_bound: f64,
    /// Limite superior do escalar controlado
    pub max_bound: f64,
    /// Velocidade de deslocamento (magnitude, >= 0)
    pub motor_speed: f64,
    /// Saída aplicada ao bloquear em um limite e em `stop()`
    pub hold_speed: f64,
    /// Banda de tolerância em torno do alvo
    pub threshold: f64,
}

impl MoveConfig {
    /// Cria configuração (não valida; veja [`MoveConfig::validate`])
    pub fn new(
        min_bound: f64,
        max_bound: f64,
        motor_speed: f64,
        hold_speed: f64,
        threshold: f64,
    ) -> Self {
        Self {
            min_bound,
            max_bound,
            motor_speed,
            hold_speed,
            threshold,
        }
    }

    /// Valida a configuração
    pub fn validate(&self) -> ControlResult<()> {
        check_finite(&[
            ("min_bound", self.min_bound),
            ("max_bound", self.max_bound),
            ("motor_speed", self.motor_speed),
            ("hold_speed", self.hold_speed),
            ("threshold", self.threshold),
        ])?;
        check_bounds(self.min_bound, self.max_bound)?;
        check_threshold(self.threshold)?;
        if self.motor_speed < 0.0 {
            return Err(ControlError::InvalidConfig(format!(
                "motor_speed must be >= 0, got {}",
                self.motor_speed
            )));
        }
        Ok(())
    }
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self::new(0.0, 10.0, 0.4, 0.0, 0.5)
    }
}

// Ambiente lido uma vez por processo
fn cached_max_speed() -> f64 {
    *config::HOLD_MAX_SPEED
}

fn cached_breakaway_offset() -> f64 {
    *config::BREAKAWAY_OFFSET
}

/// Configuração do controlador de hold ativo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldConfig {
    /// Ganho máximo da correção (> 0)
    #[serde(default = "cached_max_speed")]
    pub max_speed: f64,
    /// Banda morta em torno do alvo
    pub threshold: f64,
    /// Limite inferior
    pub min_bound: f64,
    /// Limite superior
    pub max_bound: f64,
    /// Offset de atrito de arranque somado a toda correção
    #[serde(default = "cached_breakaway_offset")]
    pub breakaway_offset: f64,
}

impl HoldConfig {
    /// Cria configuração com velocidade máxima e offset padrão
    pub fn new(min_bound: f64, max_bound: f64, threshold: f64) -> Self {
        Self {
            max_speed: cached_max_speed(),
            threshold,
            min_bound,
            max_bound,
            breakaway_offset: cached_breakaway_offset(),
        }
    }

    /// Sobrescreve a velocidade máxima; `None` mantém o padrão
    pub fn with_max_speed(mut self, max_speed: Option<f64>) -> Self {
        if let Some(speed) = max_speed {
            self.max_speed = speed;
        }
        self
    }

    /// Sobrescreve o offset de atrito
    pub fn with_breakaway_offset(mut self, offset: f64) -> Self {
        self.breakaway_offset = offset;
        self
    }

    /// Valida a configuração
    pub fn validate(&self) -> ControlResult<()> {
        check_finite(&[
            ("max_speed", self.max_speed),
            ("threshold", self.threshold),
            ("min_bound", self.min_bound),
            ("max_bound", self.max_bound),
            ("breakaway_offset", self.breakaway_offset),
        ])?;
        check_bounds(self.min_bound, self.max_bound)?;
        check_threshold(self.threshold)?;
        if self.max_speed <= 0.0 {
            return Err(ControlError::InvalidConfig(format!(
                "max_speed must be > 0, got {}",
                self.max_speed
            )));
        }
        Ok(())
    }
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self::new(0.0, 10.0, 0.1)
    }
}
