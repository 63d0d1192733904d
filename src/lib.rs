pub mod bounds;
pub mod constants;
pub mod dataset;
pub mod door;
pub mod generate_layout;
pub mod grid;
pub mod layout;
pub mod room;
pub mod room_type;
pub mod runtime_builder;
