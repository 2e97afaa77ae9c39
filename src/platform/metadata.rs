use std::env;

use crate::installer::{InstallSourceRecord, MetadataError, PackageMetadataSource};

/// Variable d'ambiance à champ unique posée par la couche d'empaquetage.
const INSTALL_CHANNEL_VAR: &str = "POCKETVAULT_INSTALLER";

/// Métadonnées de paquets adossées à l'environnement d'exécution hôte.
///
/// Les empaquetages récents (bac à sable de store ou de distribution)
/// maintiennent une fiche structurée d'origine; à défaut, l'accesseur
/// historique à champ unique reste la seule information disponible.
pub struct SystemPackageMetadata;

impl PackageMetadataSource for SystemPackageMetadata {
    fn supports_install_source_records(&self) -> bool {
        detect_install_source_record().is_some()
    }

    fn install_source_record(
        &self,
        package_id: &str,
    ) -> Result<InstallSourceRecord, MetadataError> {
        detect_install_source_record()
            .ok_or_else(|| MetadataError::RecordNotFound(package_id.to_string()))
    }

    fn installer_package_name(&self, _package_id: &str) -> Option<String> {
        env::var(INSTALL_CHANNEL_VAR)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Construit une fiche dont seul le paquet installateur est connu.
fn record_from_installer(installer: &str) -> InstallSourceRecord {
    InstallSourceRecord {
        installing_package: Some(installer.to_string()),
        ..InstallSourceRecord::default()
    }
}

#[cfg(target_os = "linux")]
fn detect_install_source_record() -> Option<InstallSourceRecord> {
    // Bac à sable Flatpak: la fiche d'instance expose le dépôt d'origine.
    if let Ok(info) = std::fs::read_to_string("/.flatpak-info") {
        return Some(match parse_flatpak_origin(&info) {
            Some(origin) => record_from_installer(&origin),
            None => record_from_installer("flatpak"),
        });
    }

    // Confinement snapd.
    if env::var("SNAP_NAME").is_ok() {
        return Some(record_from_installer("snapd"));
    }

    None
}

/// Extrait la valeur `origin=` d'une fiche d'instance Flatpak.
#[cfg(target_os = "linux")]
fn parse_flatpak_origin(info: &str) -> Option<String> {
    info.lines()
        .filter_map(|line| line.trim().strip_prefix("origin="))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(target_os = "windows")]
fn detect_install_source_record() -> Option<InstallSourceRecord> {
    // Les paquets du Microsoft Store s'exécutent depuis `WindowsApps`.
    let exe = env::current_exe().ok()?;
    let under_store = exe
        .components()
        .any(|part| part.as_os_str().eq_ignore_ascii_case("WindowsApps"));
    if under_store {
        Some(record_from_installer("microsoft-store"))
    } else {
        None
    }
}

#[cfg(target_os = "macos")]
fn detect_install_source_record() -> Option<InstallSourceRecord> {
    // Reçu Mac App Store embarqué dans le bundle de l'application.
    let exe = env::current_exe().ok()?;
    let contents = exe.parent()?.parent()?;
    let receipt = contents.join("_MASReceipt").join("receipt");
    if receipt.exists() {
        Some(record_from_installer("com.apple.AppStore"))
    } else {
        None
    }
}

#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
fn detect_install_source_record() -> Option<InstallSourceRecord> {
    None
}
