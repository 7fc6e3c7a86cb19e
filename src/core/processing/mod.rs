pub mod composite;
pub mod normalize;
pub mod orient;
pub mod save;
