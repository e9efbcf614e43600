pub mod activate_registration;
pub mod admin;
pub mod create_service;
pub mod deploy;
pub mod drain;
pub mod initialize;
pub mod register_agents;
pub mod slash;
pub mod terminate;
pub mod transfer_service;
pub mod unbond;
pub mod update_service;
pub mod views;

pub use activate_registration::*;
pub use admin::*;
pub use create_service::*;
pub use deploy::*;
pub use drain::*;
pub use initialize::*;
pub use register_agents::*;
pub use slash::*;
pub use terminate::*;
pub use transfer_service::*;
pub use unbond::*;
pub use update_service::*;
pub use views::*;
