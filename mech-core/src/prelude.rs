//! # Prelude — Re-exportações Convenientes
//!
//! ```
//! use mech_core::prelude::*;
//! ```

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::{breakaway_offset, default_hold_max_speed};
pub use crate::traits::{
    run_to_completion,
    Command,
    CommandOutcome,
    DriverError,
    DriverResult,
    MechComponent,
    MotorDriver,
    NeutralMode,
};
