pub mod actor;
pub mod aggregate;
pub mod capability;
pub mod delivery;
pub mod fan_out;
pub mod item_view;
pub mod requests;
pub mod response;
pub mod status;
