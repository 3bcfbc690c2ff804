pub mod go_definitions;
