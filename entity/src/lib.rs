pub mod filling_station;
pub mod filling_station_translation;
pub mod fuel_type;
pub mod language;
pub mod map_object;
pub mod map_object_translation;
pub mod user;
