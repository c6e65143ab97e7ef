pub mod transaction_controller;
