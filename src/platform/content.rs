use std::fs;
use std::path::Path;

use crate::installer::{ContentHandle, ContentResolver, FileShareAuthority, InstallError};

/// Résout les chemins privés de l'application en poignées de contenu.
pub struct SystemContentResolver;

impl ContentResolver for SystemContentResolver {
    fn resolve(
        &self,
        authority: &FileShareAuthority,
        path: &Path,
    ) -> Result<ContentHandle, InstallError> {
        let content_error = |reason: String| InstallError::ContentResolution {
            path: path.to_string_lossy().to_string(),
            reason,
        };

        // Un fichier absent échoue ici, à la résolution de contenu; aucune
        // pré-validation n'a lieu en amont.
        let canonical = path
            .canonicalize()
            .map_err(|e| content_error(e.to_string()))?;

        let metadata = fs::metadata(&canonical).map_err(|e| content_error(e.to_string()))?;
        if !metadata.is_file() {
            return Err(content_error("not a regular file".to_string()));
        }

        // Vérifie le droit de lecture effectif avant de frapper la poignée.
        fs::File::open(&canonical).map_err(|e| content_error(e.to_string()))?;

        Ok(ContentHandle::mint(authority, &canonical))
    }
}
