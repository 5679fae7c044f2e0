pub mod maps;
pub mod translate;
