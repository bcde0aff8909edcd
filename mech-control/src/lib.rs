//! # 🎛️ mech-control — Controle de Posição Limitada
//!
//! Controladores de mecanismo do MECH. Nenhum deles possui relógio ou thread
//! própria: um scheduler externo chama `tick` a cada período.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Mechanism                           │
//! │   Idle ⇄ Moving → LimitBlocked      Holding              │
//! │  ┌────────────────────┐   ┌──────────────────────────┐   │
//! │  │ BoundedMove        │   │ ActiveHold               │   │
//! │  │ posição do chamador│   │ posição = média do grupo │   │
//! │  │ bang-bang + limites│   │ correção proporcional    │   │
//! │  └─────────┬──────────┘   └────────────┬─────────────┘   │
//! │            └──── GroupLease (um por vez) ┘               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```rust
//! use mech_actuator::{Actuator, ActuatorGroup, SimulatedDriver};
//! use mech_control::{HoldConfig, Mechanism, MechanismState, MoveConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let group = ActuatorGroup::new(vec![
//!     Actuator::named("elevator-left", 1, SimulatedDriver::new(), false),
//!     Actuator::named("elevator-right", 2, SimulatedDriver::new(), true),
//! ])?;
//!
//! let mut elevator = Mechanism::new(
//!     "elevator",
//!     group,
//!     MoveConfig::new(0.0, 10.0, 0.4, 0.05, 0.5),
//!     HoldConfig::new(0.0, 10.0, 0.1),
//! )?;
//!
//! elevator.move_to(5.0)?;
//! elevator.tick(5.2)?;
//! assert_eq!(elevator.state(), MechanismState::Idle);
//!
//! elevator.hold(5.0)?;
//! assert_eq!(elevator.state(), MechanismState::Holding);
//! # Ok(())
//! # }
//! ```

pub mod active_hold;
pub mod bounded_move;
pub mod config;
pub mod error;
pub mod mechanism;
pub mod reset;

pub use active_hold::{hold_law, ActiveHold, HoldCommand, HoldSnapshot, HoldStep};
pub use bounded_move::{move_law, BoundedMove, MoveCommand, MoveSnapshot, MoveStep};
pub use config::{HoldConfig, MoveConfig};
pub use error::{ControlError, ControlResult};
pub use mechanism::{Mechanism, MechanismSnapshot, MechanismState, MechanismStep};
pub use reset::{BrakelessReset, ResetPair};
