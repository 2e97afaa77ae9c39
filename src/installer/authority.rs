use std::path::{Path, PathBuf};

use crate::utils::path::{normalize_input_path, percent_encode_path};

/// Autorité de partage de fichiers déclarée par la couche d'empaquetage.
///
/// L'autorité fait le pont entre les poignées de contenu et les fichiers du
/// stockage privé de l'application; seuls les receveurs explicitement
/// autorisés peuvent la traverser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileShareAuthority(String);

impl FileShareAuthority {
    /// Suffixe conventionnel des autorités de partage de fichiers.
    pub const SUFFIX: &'static str = "fileprovider";

    /// Dérive l'autorité conventionnelle `<identifiant>.fileprovider`.
    pub fn for_package(package_id: &str) -> Self {
        Self(format!("{}.{}", package_id, Self::SUFFIX))
    }

    /// Retourne l'identifiant complet de l'autorité.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Poignée de contenu à portée restreinte dérivée d'un chemin privé.
///
/// La poignée masque le chemin de fichier au receveur; seule l'autorité qui
/// l'a frappée sait la résoudre à nouveau vers le stockage local.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentHandle {
    uri: String,
}

impl ContentHandle {
    /// Scheme des URIs de contenu.
    pub const SCHEME: &'static str = "content";

    /// Frappe une poignée pour un chemin absolu sous l'autorité donnée.
    pub(crate) fn mint(authority: &FileShareAuthority, absolute_path: &Path) -> Self {
        let lossy = absolute_path.to_string_lossy();
        // Les chemins canoniques Windows arrivent sous forme verbatim `\\?\C:\...`.
        let stripped = lossy.strip_prefix(r"\\?\").unwrap_or(lossy.as_ref());
        let mut text = stripped.replace('\\', "/");
        if !text.starts_with('/') {
            text.insert(0, '/');
        }

        Self {
            uri: format!(
                "{}://{}{}",
                Self::SCHEME,
                authority.as_str(),
                percent_encode_path(&text)
            ),
        }
    }

    /// Retourne l'URI opaque de la poignée.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Retrouve le chemin local si la poignée appartient à l'autorité donnée.
    pub(crate) fn local_path(&self, authority: &FileShareAuthority) -> Option<PathBuf> {
        let rest = self.uri.strip_prefix(&format!("{}://", Self::SCHEME))?;
        let rest = rest.strip_prefix(authority.as_str())?;
        if !rest.starts_with('/') {
            return None;
        }
        Some(normalize_input_path(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authority_uses_fileprovider_suffix() {
        let authority = FileShareAuthority::for_package("com.pocketvault.mobile");
        assert_eq!(authority.as_str(), "com.pocketvault.mobile.fileprovider");
    }

    #[test]
    fn test_mint_scopes_uri_under_authority() {
        let authority = FileShareAuthority::for_package("com.pocketvault.mobile");
        let handle = ContentHandle::mint(&authority, Path::new("/downloads/update.apk"));
        assert_eq!(
            handle.uri(),
            "content://com.pocketvault.mobile.fileprovider/downloads/update.apk"
        );
    }

    #[test]
    fn test_mint_escapes_reserved_bytes() {
        let authority = FileShareAuthority::for_package("com.pocketvault.mobile");
        let handle = ContentHandle::mint(&authority, Path::new("/downloads/wallet release.apk"));
        assert!(handle.uri().contains("wallet%20release.apk"));
        assert!(!handle.uri().contains(' '));
    }

    #[test]
    fn test_handle_round_trip_preserves_path() {
        let authority = FileShareAuthority::for_package("com.pocketvault.mobile");
        let original = Path::new("/data/app files/pocketvault (arm64).apk");
        let handle = ContentHandle::mint(&authority, original);
        assert_eq!(handle.local_path(&authority), Some(original.to_path_buf()));
    }

    #[test]
    fn test_handle_rejects_foreign_authority() {
        let authority = FileShareAuthority::for_package("com.pocketvault.mobile");
        let other = FileShareAuthority::for_package("com.other.app");
        let handle = ContentHandle::mint(&authority, Path::new("/downloads/update.apk"));
        assert_eq!(handle.local_path(&other), None);
    }
}
