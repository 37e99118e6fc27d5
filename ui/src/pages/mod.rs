pub mod implantation_suivi;

pub use implantation_suivi::ImplantationSuiviPage;
