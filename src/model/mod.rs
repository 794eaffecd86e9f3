pub use bitlings_core::{Creature, DecisionNetwork, World};
pub mod brain {
    pub use bitlings_core::brain::*;
}
pub mod config {
    pub use bitlings_core::config::*;
}
pub mod creature {
    pub use bitlings_core::creature::*;
}
pub mod lifecycle {
    pub use bitlings_core::lifecycle::*;
}
pub mod perception {
    pub use bitlings_core::perception::*;
}
pub mod steering {
    pub use bitlings_core::steering::*;
}
pub mod systems {
    pub use bitlings_core::systems::*;
}
pub mod world {
    pub use bitlings_core::world::*;
}
pub mod scheduler {
    pub use bitlings_core::scheduler::*;
}
pub mod metrics {
    pub use bitlings_core::metrics::*;
}
pub mod data {
    pub use bitlings_data::*;
}
pub mod network {
    pub use bitlings_net::*;
}
pub mod server {
    pub use bitlings_server::*;
}
