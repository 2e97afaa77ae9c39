use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::authority::{ContentHandle, FileShareAuthority};
use crate::utils::path::normalize_input_path;

/// Type MIME des archives de paquet installables.
pub const PACKAGE_ARCHIVE_MIME: &str = "application/vnd.android.package-archive";

/// Erreurs du flux de remise d'un paquet au système.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Le chemin n'a pas pu être résolu en poignée de contenu.
    #[error("unable to resolve '{path}' to a content handle: {reason}")]
    ContentResolution { path: String, reason: String },
    /// Le système n'a pas pris en charge l'intent d'installation.
    #[error("unable to dispatch the install intent: {reason}")]
    Dispatch { reason: String },
}

/// Demande d'installation d'un artefact de paquet téléchargé.
///
/// Le fichier appartient au gestionnaire de téléchargement appelant avant et
/// après l'appel; la demande n'en prend jamais possession et n'est consommée
/// qu'une seule fois, sans re-essai.
#[derive(Clone, Debug)]
pub struct InstallRequest {
    path: PathBuf,
}

impl InstallRequest {
    /// Construit la demande depuis le chemin brut transmis par le bridge.
    pub fn from_raw(raw: &str) -> Self {
        Self {
            path: normalize_input_path(raw),
        }
    }

    /// Construit la demande depuis un chemin déjà normalisé.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Chemin du paquet candidat.
    pub fn package_path(&self) -> &Path {
        &self.path
    }
}

/// Drapeaux de lancement appliqués à l'intent d'installation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntentFlags {
    /// Démarre le flux dans une tâche indépendante de la pile appelante.
    pub new_task: bool,
    /// Accorde au receveur un droit de lecture temporaire sur le contenu.
    pub grant_read_permission: bool,
}

/// Intent typé remis au système pour ouvrir le flux d'installation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallIntent {
    /// Type MIME annoncé au receveur.
    pub mime_type: String,
    /// Poignée de contenu adressée.
    pub content: ContentHandle,
    /// Drapeaux de lancement.
    pub flags: IntentFlags,
}

impl InstallIntent {
    /// Construit l'intent d'installation standard pour une poignée de paquet.
    pub fn for_package(content: ContentHandle) -> Self {
        Self {
            mime_type: PACKAGE_ARCHIVE_MIME.to_string(),
            content,
            flags: IntentFlags {
                new_task: true,
                grant_read_permission: true,
            },
        }
    }
}

/// Résolution d'un chemin privé en poignée de contenu à accès restreint.
pub trait ContentResolver: Send + Sync {
    /// Résout `path` sous `authority`; échoue si le fichier n'est pas lisible.
    fn resolve(
        &self,
        authority: &FileShareAuthority,
        path: &Path,
    ) -> Result<ContentHandle, InstallError>;
}

/// Remise d'un intent typé au système hôte.
pub trait IntentDispatcher: Send + Sync {
    /// Demande au système de démarrer le flux correspondant à l'intent.
    fn dispatch(&self, intent: &InstallIntent) -> Result<(), InstallError>;
}

/// Initie le flux d'installation système pour un paquet téléchargé.
///
/// La responsabilité s'arrête au lancement du flux: ni l'acceptation, ni
/// l'issue de l'installation ne sont suivies ou remontées.
pub struct PackageInstaller {
    authority: FileShareAuthority,
    resolver: Arc<dyn ContentResolver>,
    dispatcher: Arc<dyn IntentDispatcher>,
}

impl PackageInstaller {
    /// Assemble l'installeur sur ses collaborateurs système.
    pub fn new(
        authority: FileShareAuthority,
        resolver: Arc<dyn ContentResolver>,
        dispatcher: Arc<dyn IntentDispatcher>,
    ) -> Self {
        Self {
            authority,
            resolver,
            dispatcher,
        }
    }

    /// Autorité de partage configurée pour ce processus.
    pub fn authority(&self) -> &FileShareAuthority {
        &self.authority
    }

    /// Résout le paquet en poignée de contenu puis remet l'intent au système.
    ///
    /// Le fichier n'est pas validé ici: un chemin absent ou illisible échoue à
    /// l'étape de résolution de contenu, avant toute remise d'intent.
    pub fn install(&self, request: &InstallRequest) -> Result<(), InstallError> {
        let content = self
            .resolver
            .resolve(&self.authority, request.package_path())?;
        let intent = InstallIntent::for_package(content);
        self.dispatcher.dispatch(&intent)
    }
}
