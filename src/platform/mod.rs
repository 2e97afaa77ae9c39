//! Collaborateurs système du sous-système d'installation, adossés à
//! l'environnement d'exécution hôte.

mod content;
mod dispatch;
mod metadata;

pub use content::SystemContentResolver;
pub use dispatch::SystemIntentDispatcher;
pub use metadata::SystemPackageMetadata;
