//! # ⚙️ mech-core — Abstrações de Mecanismo
//!
//! Núcleo do ecossistema MECH: define as fronteiras entre a camada de controle
//! e os colaboradores externos (driver físico, scheduler de comandos, relógio).
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │        Scheduler externo (tick periódico)    │
//! │   initialize() → execute()* → end()          │
//! └──────────────────────┬───────────────────────┘
//!                        ↓  Command
//! ┌──────────────────────────────────────────────┐
//! │      mech-control  (BoundedMove, ActiveHold) │
//! └──────────────────────┬───────────────────────┘
//!                        ↓  set_output / neutral mode
//! ┌──────────────────────────────────────────────┐
//! │      mech-actuator (Actuator, Group)         │
//! └──────────────────────┬───────────────────────┘
//!                        ↓  MotorDriver
//!               Hardware (TalonFX, PWM, CAN...)
//! ```
//!
//! ## Módulos
//!
//! - [`traits`] - `MotorDriver`, `Command`, `MechComponent`
//! - [`clock`] - Fonte de tempo injetável (sem relógio oculto)
//! - [`config`] - Defaults de sintonia carregados de `.env`

pub mod clock;
pub mod config;
pub mod prelude;
pub mod traits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use traits::{
    run_to_completion, Command, CommandOutcome, DriverError, DriverResult, MechComponent,
    MotorDriver, NeutralMode,
};
