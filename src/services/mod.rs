pub mod csv_loader;
pub mod series_builder;
pub mod validator;
