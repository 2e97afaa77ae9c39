use crate::installer::{self, InstallRequest, ProvenanceResult};

/// Message retourné quand une commande est appelée avant le montage du setup.
const RUNTIME_NOT_MOUNTED: &str = "Installer runtime is not initialized";

/// Interroge la provenance d'installation de l'application courante.
///
/// La réponse du bridge est une chaîne unique: identifiant opaque de
/// l'installateur, chaîne vide si inconnu/chargé manuellement, ou
/// `Error:<détails>` quand la fiche de source est introuvable. Les appelants
/// filtrent cette chaîne telle quelle, sans la décomposer.
#[tauri::command]
pub fn verify_installer_id() -> Result<String, String> {
    let runtime = installer::runtime().ok_or_else(|| RUNTIME_NOT_MOUNTED.to_string())?;

    let mut delivered = Err("Installer provenance was not delivered".to_string());
    runtime.provenance.resolve_with(|result| {
        delivered = match result {
            ProvenanceResult::Identified(id) => Ok(id),
            ProvenanceResult::QueryFailed(reason) => {
                Err(format!("Unable to query installer provenance: {}", reason))
            }
        };
    });
    delivered
}

/// Remet un paquet téléchargé au flux d'installation du système.
///
/// L'appel rend la main dès que le lancement du flux est demandé; aucune
/// confirmation d'issue n'est suivie. Un chemin absent ou illisible échoue
/// de manière synchrone, avant toute remise au système.
#[tauri::command]
pub fn install_package(path: String) -> Result<(), String> {
    let runtime = installer::runtime().ok_or_else(|| RUNTIME_NOT_MOUNTED.to_string())?;

    let request = InstallRequest::from_raw(&path);
    runtime.installer.install(&request).map_err(|e| e.to_string())
}
