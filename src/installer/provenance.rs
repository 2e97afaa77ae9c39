use std::sync::Arc;

use thiserror::Error;

/// Préfixe historique replié dans le canal succès quand la fiche est absente.
pub const LOOKUP_ERROR_PREFIX: &str = "Error:";

/// Fiche de source d'installation maintenue par le système (générations récentes).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstallSourceRecord {
    /// Paquet ayant réalisé l'installation.
    pub installing_package: Option<String>,
    /// Paquet ayant initié la demande d'installation.
    pub initiating_package: Option<String>,
    /// Paquet d'origine de l'artefact s'il a été relayé.
    pub originating_package: Option<String>,
}

/// Erreurs du service de métadonnées de paquets.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    /// Aucune fiche de source d'installation pour ce paquet.
    #[error("no install source record found for package '{0}'")]
    RecordNotFound(String),
    /// La requête vers le service a elle-même échoué.
    #[error("package metadata service unavailable: {0}")]
    Unavailable(String),
}

/// Service de métadonnées de paquets exposé par le système hôte.
pub trait PackageMetadataSource: Send + Sync {
    /// Indique si le système maintient des fiches détaillées de source.
    fn supports_install_source_records(&self) -> bool;

    /// Fiche détaillée de source d'installation (générations récentes).
    fn install_source_record(&self, package_id: &str)
        -> Result<InstallSourceRecord, MetadataError>;

    /// Accesseur historique à champ unique (générations anciennes).
    fn installer_package_name(&self, package_id: &str) -> Option<String>;
}

/// Réponse ponctuelle à « qui a installé cette application ? ».
///
/// Jamais mise en cache: la source d'installation ne change pas pour une
/// instance en cours d'exécution, mais chaque appelant ré-interroge au besoin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProvenanceResult {
    /// Identifiant opaque de l'installateur (chaîne vide si inconnu).
    Identified(String),
    /// La requête système elle-même a échoué.
    QueryFailed(String),
}

/// Résout l'identité de l'installateur pour une génération d'API donnée.
pub trait InstallerIdentityProvider: Send + Sync {
    /// Interroge le système pour `package_id` et normalise la réponse.
    fn resolve(&self, package_id: &str) -> ProvenanceResult;
}

/// Fournisseur adossé aux fiches détaillées de source d'installation.
pub struct ModernProvider {
    source: Arc<dyn PackageMetadataSource>,
}

impl ModernProvider {
    /// Construit le fournisseur sur le service de métadonnées donné.
    pub fn new(source: Arc<dyn PackageMetadataSource>) -> Self {
        Self { source }
    }
}

impl InstallerIdentityProvider for ModernProvider {
    fn resolve(&self, package_id: &str) -> ProvenanceResult {
        match self.source.install_source_record(package_id) {
            Ok(record) => {
                ProvenanceResult::Identified(record.installing_package.unwrap_or_default())
            }
            // Contrat historique: l'absence de fiche est repliée dans le canal
            // succès sous forme de chaîne préfixée, jamais en erreur distincte.
            Err(err @ MetadataError::RecordNotFound(_)) => {
                ProvenanceResult::Identified(format!("{}{}", LOOKUP_ERROR_PREFIX, err))
            }
            Err(MetadataError::Unavailable(reason)) => ProvenanceResult::QueryFailed(reason),
        }
    }
}

/// Fournisseur adossé à l'accesseur historique à champ unique.
pub struct LegacyProvider {
    source: Arc<dyn PackageMetadataSource>,
}

impl LegacyProvider {
    /// Construit le fournisseur sur le service de métadonnées donné.
    pub fn new(source: Arc<dyn PackageMetadataSource>) -> Self {
        Self { source }
    }
}

impl InstallerIdentityProvider for LegacyProvider {
    fn resolve(&self, package_id: &str) -> ProvenanceResult {
        // L'accesseur historique répond vide plutôt que d'échouer.
        ProvenanceResult::Identified(
            self.source
                .installer_package_name(package_id)
                .unwrap_or_default(),
        )
    }
}

/// Sélectionne le fournisseur adapté à la génération du système hôte.
///
/// La capacité n'est sondée qu'ici, une seule fois au démarrage; les appels
/// suivants passent par le fournisseur retenu sans re-vérification.
pub fn select_provider(
    source: Arc<dyn PackageMetadataSource>,
) -> Box<dyn InstallerIdentityProvider> {
    if source.supports_install_source_records() {
        Box::new(ModernProvider::new(source))
    } else {
        Box::new(LegacyProvider::new(source))
    }
}

/// Répond à la provenance d'installation de l'application courante.
pub struct ProvenanceResolver {
    package_id: String,
    provider: Box<dyn InstallerIdentityProvider>,
}

impl ProvenanceResolver {
    /// Construit le résolveur en figeant la génération au démarrage.
    pub fn new(package_id: impl Into<String>, source: Arc<dyn PackageMetadataSource>) -> Self {
        Self {
            package_id: package_id.into(),
            provider: select_provider(source),
        }
    }

    /// Construit le résolveur avec un fournisseur déjà sélectionné.
    pub fn with_provider(
        package_id: impl Into<String>,
        provider: Box<dyn InstallerIdentityProvider>,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            provider,
        }
    }

    /// Interroge la provenance et retourne la réponse ponctuelle.
    pub fn resolve(&self) -> ProvenanceResult {
        self.provider.resolve(&self.package_id)
    }

    /// Remet la réponse au callback fourni par le bridge, exactement une fois,
    /// sur le thread appelant. Pas de re-essai ni de délai: une requête lente
    /// retarde simplement l'unique remise.
    pub fn resolve_with<F>(&self, deliver: F)
    where
        F: FnOnce(ProvenanceResult),
    {
        deliver(self.resolve());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeMetadata {
        supports_records: bool,
        record: Result<InstallSourceRecord, MetadataError>,
        legacy_name: Option<String>,
    }

    impl FakeMetadata {
        fn modern(record: Result<InstallSourceRecord, MetadataError>) -> Arc<Self> {
            Arc::new(Self {
                supports_records: true,
                record,
                legacy_name: None,
            })
        }

        fn legacy(legacy_name: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                supports_records: false,
                record: Err(MetadataError::Unavailable("no record channel".to_string())),
                legacy_name: legacy_name.map(str::to_string),
            })
        }
    }

    impl PackageMetadataSource for FakeMetadata {
        fn supports_install_source_records(&self) -> bool {
            self.supports_records
        }

        fn install_source_record(
            &self,
            _package_id: &str,
        ) -> Result<InstallSourceRecord, MetadataError> {
            self.record.clone()
        }

        fn installer_package_name(&self, _package_id: &str) -> Option<String> {
            self.legacy_name.clone()
        }
    }

    fn store_record(installing: &str) -> InstallSourceRecord {
        InstallSourceRecord {
            installing_package: Some(installing.to_string()),
            ..InstallSourceRecord::default()
        }
    }

    #[test]
    fn test_modern_returns_installing_package_unchanged() {
        let source = FakeMetadata::modern(Ok(store_record("com.android.vending")));
        let resolver = ProvenanceResolver::new("com.pocketvault.mobile", source);
        assert_eq!(
            resolver.resolve(),
            ProvenanceResult::Identified("com.android.vending".to_string())
        );
    }

    #[test]
    fn test_modern_unknown_installing_package_is_empty_string() {
        let source = FakeMetadata::modern(Ok(InstallSourceRecord::default()));
        let resolver = ProvenanceResolver::new("com.pocketvault.mobile", source);
        assert_eq!(
            resolver.resolve(),
            ProvenanceResult::Identified(String::new())
        );
    }

    #[test]
    fn test_modern_missing_record_folds_into_error_string() {
        let source = FakeMetadata::modern(Err(MetadataError::RecordNotFound(
            "com.pocketvault.mobile".to_string(),
        )));
        let resolver = ProvenanceResolver::new("com.pocketvault.mobile", source);
        match resolver.resolve() {
            ProvenanceResult::Identified(value) => {
                assert!(value.starts_with(LOOKUP_ERROR_PREFIX));
                assert!(value.contains("com.pocketvault.mobile"));
            }
            other => panic!("expected folded lookup failure, got {:?}", other),
        }
    }

    #[test]
    fn test_modern_unavailable_service_is_query_failure() {
        let source = FakeMetadata::modern(Err(MetadataError::Unavailable(
            "metadata daemon unreachable".to_string(),
        )));
        let resolver = ProvenanceResolver::new("com.pocketvault.mobile", source);
        assert_eq!(
            resolver.resolve(),
            ProvenanceResult::QueryFailed("metadata daemon unreachable".to_string())
        );
    }

    #[test]
    fn test_legacy_unknown_installer_is_empty_string() {
        let source = FakeMetadata::legacy(None);
        let resolver = ProvenanceResolver::new("com.pocketvault.mobile", source);
        assert_eq!(
            resolver.resolve(),
            ProvenanceResult::Identified(String::new())
        );
    }

    #[test]
    fn test_legacy_known_installer_passthrough() {
        let source = FakeMetadata::legacy(Some("com.google.android.packageinstaller"));
        let resolver = ProvenanceResolver::new("com.pocketvault.mobile", source);
        assert_eq!(
            resolver.resolve(),
            ProvenanceResult::Identified("com.google.android.packageinstaller".to_string())
        );
    }

    #[test]
    fn test_selection_honors_capability_probe() {
        // Même avec une fiche disponible, un système sans capacité déclarée
        // doit passer par l'accesseur historique.
        let source = Arc::new(FakeMetadata {
            supports_records: false,
            record: Ok(store_record("com.android.vending")),
            legacy_name: Some("legacy.store".to_string()),
        });
        let resolver = ProvenanceResolver::new("com.pocketvault.mobile", source);
        assert_eq!(
            resolver.resolve(),
            ProvenanceResult::Identified("legacy.store".to_string())
        );
    }

    #[test]
    fn test_with_provider_bypasses_selection() {
        let source = FakeMetadata::legacy(Some("legacy.store"));
        let resolver = ProvenanceResolver::with_provider(
            "com.pocketvault.mobile",
            Box::new(LegacyProvider::new(source)),
        );
        assert_eq!(
            resolver.resolve(),
            ProvenanceResult::Identified("legacy.store".to_string())
        );
    }

    #[test]
    fn test_callback_invoked_exactly_once() {
        let source = FakeMetadata::legacy(Some("com.android.vending"));
        let resolver = ProvenanceResolver::new("com.pocketvault.mobile", source);
        let calls = AtomicUsize::new(0);
        resolver.resolve_with(|result| {
            calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(
                result,
                ProvenanceResult::Identified("com.android.vending".to_string())
            );
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
