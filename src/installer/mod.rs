//! Sous-système d'auto-mise à jour du wallet: provenance d'installation et
//! remise d'un paquet téléchargé au flux d'installation du système.
//!
//! Les deux opérations sont indépendantes et sans état partagé; l'attelage
//! système est monté une seule fois au démarrage puis uniquement lu.

mod authority;
mod package;
mod provenance;

pub use authority::{ContentHandle, FileShareAuthority};
pub use package::{
    ContentResolver, InstallError, InstallIntent, InstallRequest, IntentDispatcher, IntentFlags,
    PackageInstaller, PACKAGE_ARCHIVE_MIME,
};
pub use provenance::{
    select_provider, InstallSourceRecord, InstallerIdentityProvider, LegacyProvider, MetadataError,
    ModernProvider, PackageMetadataSource, ProvenanceResolver, ProvenanceResult,
    LOOKUP_ERROR_PREFIX,
};

use std::sync::{Arc, OnceLock};

use crate::platform::{SystemContentResolver, SystemIntentDispatcher, SystemPackageMetadata};

/// Attelage de l'installeur monté au démarrage de l'application.
pub struct InstallerRuntime {
    /// Résolveur de provenance figé sur la génération détectée.
    pub provenance: ProvenanceResolver,
    /// Installeur de paquets adossé aux collaborateurs système.
    pub installer: PackageInstaller,
}

impl InstallerRuntime {
    /// Assemble l'attelage sur les collaborateurs système réels.
    pub fn with_system_collaborators(package_id: &str) -> Self {
        let metadata = Arc::new(SystemPackageMetadata);
        let authority = FileShareAuthority::for_package(package_id);

        Self {
            provenance: ProvenanceResolver::new(package_id, metadata),
            installer: PackageInstaller::new(
                authority.clone(),
                Arc::new(SystemContentResolver),
                Arc::new(SystemIntentDispatcher::new(authority)),
            ),
        }
    }
}

static RUNTIME: OnceLock<InstallerRuntime> = OnceLock::new();

/// Monte l'attelage de l'installeur pour l'identifiant d'application donné.
/// Les montages suivants sont ignorés.
pub fn init(package_id: &str) {
    let _ = RUNTIME.set(InstallerRuntime::with_system_collaborators(package_id));
}

/// Retourne l'attelage monté au démarrage, s'il existe.
pub fn runtime() -> Option<&'static InstallerRuntime> {
    RUNTIME.get()
}
