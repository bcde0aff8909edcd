//! Erros da camada de atuador

use thiserror::Error;
use mech_core::traits::DriverError;
use crate::types::ControllerId;

pub type ActuatorResult<T> = Result<T, ActuatorError>;

/// Erros de atuador
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActuatorError {
    /// Falha do driver físico, propagada sem modificação
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Grupo sem atuadores (falha de configuração)
    #[error("Actuator group is empty")]
    EmptyGroup,

    /// Atuador já pertence a outro controlador ativo
    #[error("Actuator '{actuator}' already claimed by controller {owner}")]
    AlreadyClaimed {
        actuator: String,
        owner: ControllerId,
    },

    /// Lock envenenado
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for ActuatorError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        ActuatorError::LockPoisoned(err.to_string())
    }
}
