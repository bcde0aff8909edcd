//! # 🦾 mech-actuator — Atuadores e Grupos
//!
//! Camada de atuação do MECH: embrulha canais físicos de motor com correção
//! de direção, agrupa atuadores e controla quem tem o direito de comandá-los.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            Actuator Layer                   │
//! │  ┌──────────────┐   ┌────────────────────┐  │
//! │  │ ActuatorGroup│ → │ GroupLease (claim) │  │
//! │  │  average()   │   │  set_all()         │  │
//! │  └──────────────┘   └────────────────────┘  │
//! │          ↓                    ↓             │
//! │  ┌───────────────────────────────────────┐  │
//! │  │  Actuator (inversão fixa, Clone = ref) │  │
//! │  └───────────────────────────────────────┘  │
//! └─────────────────────────────────────────────┘
//!                      ↓
//!          MotorDriver (hardware / simulado)
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use mech_actuator::{Actuator, ActuatorGroup, ControllerId, SimulatedDriver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let left = Actuator::named("lift-left", 1, SimulatedDriver::new(), false);
//! let right = Actuator::named("lift-right", 2, SimulatedDriver::new(), true);
//! let group = ActuatorGroup::new(vec![left, right])?;
//!
//! let lease = group.claim(ControllerId::next())?;
//! lease.set_all(0.4)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Segurança
//!
//! - Grupo vazio é erro de configuração, nunca um valor sentinela
//! - Um atuador só aceita comandos de controle de um lease por vez
//! - Erros de driver sobem sem modificação

pub mod aggregate;
pub mod driver;
pub mod error;
pub mod flywheel;
pub mod group;
pub mod motor;
pub mod types;

pub use aggregate::average;
pub use driver::{SimulatedDriver, SimulatedState};
pub use error::{ActuatorError, ActuatorResult};
pub use flywheel::{FlywheelConfig, FlywheelPair};
pub use group::{ActuatorGroup, GroupLease};
pub use motor::{Actuator, ActuatorConfig};
pub use types::{ControllerId, MotorDirection};
