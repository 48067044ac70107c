// Sources de données HTTP externes.
pub mod dia;
