//! Erros de controle

use thiserror::Error;
use mech_actuator::ActuatorError;

pub type ControlResult<T> = Result<T, ControlError>;

/// Erros de controle
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Configuração inválida (limites, velocidades, listas vazias)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Entrada não finita (alvo ou leitura de posição)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tick ou stop sem a capacidade de ativação
    #[error("Controller not active: {0}")]
    NotActive(String),

    /// Erro de atuador
    #[error("Actuator error: {0}")]
    Actuator(#[from] ActuatorError),
}

/// Rejeita NaN e infinitos
pub(crate) fn ensure_finite(what: &str, value: f64) -> ControlResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ControlError::InvalidInput(format!("{} must be finite, got {}", what, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ControlError::InvalidConfig("min_bound > max_bound".into());
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_actuator_error_conversion() {
        let err: ControlError = ActuatorError::EmptyGroup.into();
        assert_eq!(err, ControlError::Actuator(ActuatorError::EmptyGroup));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("target", 2.5), Ok(2.5));
        assert!(ensure_finite("target", f64::NAN).is_err());
        assert!(ensure_finite("reading", f64::NEG_INFINITY).is_err());
    }
}
