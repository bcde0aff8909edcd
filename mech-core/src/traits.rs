//! # 🎯 Traits — Fronteiras do Sistema MECH
//!
//! | Fronteira | Trait | Quem implementa |
//! |:----------|:------|:----------------|
//! | Hardware | [`MotorDriver`] | Driver físico (TalonFX, PWM, simulador) |
//! | Scheduler | [`Command`] | Controladores de `mech-control` |
//! | Identidade | [`MechComponent`] | Atuadores e controladores |
//!
//! Os traits aqui são **abstrações puras**. Nenhuma implementação concreta de
//! hardware vive neste crate.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

// ═══════════════════════════════════════════════════════════════════════════════
// COMPONENTE BASE
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait base de identificação de componentes MECH.
///
/// ```
/// use mech_core::traits::MechComponent;
///
/// #[derive(Debug)]
/// struct Elevator;
///
/// impl MechComponent for Elevator {
///     fn name(&self) -> &str { "elevator" }
/// }
/// ```
pub trait MechComponent: Send + Sync + Debug {
    /// Nome único do componente (para logs e debug)
    fn name(&self) -> &str;

    /// Versão do componente (para compatibilidade)
    fn version(&self) -> &str {
        "2026.10.15"
    }

    /// Componente está pronto para uso?
    fn is_ready(&self) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// HARDWARE — Driver de motor
// ═══════════════════════════════════════════════════════════════════════════════

/// Resultado de operações de driver
pub type DriverResult<T> = Result<T, DriverError>;

/// Erro reportado pelo driver físico.
///
/// A camada de controle nunca reinterpreta estes erros: eles sobem sem
/// modificação até o dono do mecanismo.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error("Command failed: {0}")]
    CommandFailed(String),
    #[error("Driver busy")]
    Busy,
    #[error("Driver fault: {0}")]
    Fault(String),
    #[error("Driver disconnected")]
    Disconnected,
}

/// Modo neutro do driver (comportamento com saída zero)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeutralMode {
    /// Freio passivo: o driver curto-circuita o motor e resiste ao movimento
    Brake,
    /// Roda livre: o mecanismo pode cair/assentar sem resistência
    Coast,
}

impl std::fmt::Display for NeutralMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NeutralMode::Brake => write!(f, "brake"),
            NeutralMode::Coast => write!(f, "coast"),
        }
    }
}

/// Canal físico de saída de um motor.
///
/// Valores de saída são normalizados (canonicamente `[-1.0, 1.0]`) mas o
/// driver não é obrigado a saturá-los; isso é responsabilidade do chamador.
///
/// # Exemplo
///
/// ```
/// use mech_core::traits::{DriverResult, MotorDriver, NeutralMode};
///
/// #[derive(Debug, Default)]
/// struct Pwm { duty: f64 }
///
/// impl MotorDriver for Pwm {
///     fn set_output(&mut self, value: f64) -> DriverResult<()> {
///         self.duty = value;
///         Ok(())
///     }
///
///     fn output(&self) -> f64 {
///         self.duty
///     }
///
///     fn set_neutral_mode(&mut self, _mode: NeutralMode) -> DriverResult<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait MotorDriver: Send + Debug {
    /// Aplica a saída comandada, de forma síncrona e imediata
    fn set_output(&mut self, value: f64) -> DriverResult<()>;

    /// Última saída comandada, como reportada pelo driver
    fn output(&self) -> f64;

    /// Troca o modo neutro (freio passivo / roda livre)
    fn set_neutral_mode(&mut self, mode: NeutralMode) -> DriverResult<()>;
}

impl<D: MotorDriver + ?Sized> MotorDriver for Box<D> {
    fn set_output(&mut self, value: f64) -> DriverResult<()> {
        (**self).set_output(value)
    }

    fn output(&self) -> f64 {
        (**self).output()
    }

    fn set_neutral_mode(&mut self, mode: NeutralMode) -> DriverResult<()> {
        (**self).set_neutral_mode(mode)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCHEDULER — Contrato de comando
// ═══════════════════════════════════════════════════════════════════════════════

/// Contrato entre um controlador e o scheduler periódico que o executa.
///
/// O scheduler chama `initialize` uma vez, depois `execute` a cada período
/// até `is_finished` retornar `true` (ou até ser interrompido), e por fim
/// `end`. Nenhum método bloqueia.
pub trait Command {
    /// Tipo de erro propagado ao scheduler
    type Error;

    /// Chamado uma vez antes do primeiro `execute`
    fn initialize(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Um tick do laço de controle
    fn execute(&mut self) -> Result<(), Self::Error>;

    /// O comando terminou sozinho?
    fn is_finished(&self) -> bool {
        false
    }

    /// Chamado uma vez ao final (`interrupted = true` se cancelado)
    fn end(&mut self, _interrupted: bool) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Resultado de [`run_to_completion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// Ticks executados
    pub ticks: usize,
    /// `true` se terminou antes de esgotar o orçamento
    pub finished: bool,
}

/// Executa um comando tick a tick, sem esperar entre ticks.
///
/// Se o orçamento `max_ticks` acabar antes de `is_finished`, o comando é
/// encerrado como interrompido.
pub fn run_to_completion<C: Command>(
    command: &mut C,
    max_ticks: usize,
) -> Result<CommandOutcome, C::Error> {
    command.initialize()?;

    let mut ticks = 0;
    while ticks < max_ticks && !command.is_finished() {
        if let Err(err) = command.execute() {
            let _ = command.end(true);
            return Err(err);
        }
        ticks += 1;
    }

    let finished = command.is_finished();
    command.end(!finished)?;
    Ok(CommandOutcome { ticks, finished })
}
