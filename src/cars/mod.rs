pub mod cars;

pub use cars::{create_car, delete_car, get_cars, missing_car_id, update_car};
