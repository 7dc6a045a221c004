//! The pure core: type family, routing, and transition types.
//!
//! Everything in this module is side-effect-free:
//! - The `Program` type family and `Init` seam
//! - `State`, `Event`, `Waiter`, `Resolution` traits and the `Step` result
//! - Event routing via `route` and `dispatch`
//! - The dispatch `Journal` data types
//!
//! I/O lives exclusively in the `effects` module.

mod dispatch;
mod event;
mod journal;
mod program;
mod state;
mod waiter;

pub use dispatch::{dispatch, route, Routed};
pub use event::{Event, Step};
pub use journal::{DispatchRecord, Journal, Outcome};
pub use program::{Init, Program};
pub use state::State;
pub use waiter::{Resolution, Waiter};
