/// Commandes d'informations sur l'application.
pub mod application;
/// Commandes du sous-système d'installation et de provenance.
pub mod installer;
