use tauri::Manager;

/// Informations de version exposées au frontend pour le contrôle de mise à jour.
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    /// Nom du produit.
    pub name: String,
    /// Version sémantique de l'application.
    pub version: String,
    /// Numéro de build monotone dérivé de la version.
    pub build_number: u64,
    /// Identifiant de paquet de l'application.
    pub identifier: String,
}

/// Retourne les informations de version de l'application courante.
#[tauri::command]
pub fn get_application_info(app: tauri::AppHandle) -> ApplicationInfo {
    let info = app.package_info();
    let version = &info.version;

    ApplicationInfo {
        name: info.name.clone(),
        version: version.to_string(),
        build_number: version.major * 10_000 + version.minor * 100 + version.patch,
        identifier: app.config().identifier.clone(),
    }
}

/// Retourne le dossier de téléchargements où déposer les artefacts de paquet.
#[tauri::command]
pub fn get_download_dir() -> Result<String, String> {
    dirs::download_dir()
        .map(|path| path.to_string_lossy().to_string())
        .ok_or_else(|| "Unable to determine download directory".to_string())
}
