pub mod store_controller;
