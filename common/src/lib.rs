pub mod alert;
pub mod currency;
pub mod identity;
pub mod interaction;
pub mod location;
pub mod medicine;
pub mod order;
pub mod pharmacy;
pub mod records;
pub mod search;
pub mod trend;
