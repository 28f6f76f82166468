pub mod enums;
pub mod products;
pub mod storage;
pub mod surveys;
