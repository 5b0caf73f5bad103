pub mod competitive;
pub mod forecast;
pub mod inputs;
pub mod production;
pub mod strategy;
pub mod warning;
