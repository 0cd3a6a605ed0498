//! Services composed on top of the repository contracts

pub mod combination;

pub use combination::{
    new_combination_service, CombinationService, CombinationServiceImpl, JoinStrategy,
};
