use std::process::Command;

use crate::installer::{FileShareAuthority, InstallError, InstallIntent, IntentDispatcher};
use crate::utils::process::configure_command_no_window;

/// Remet les intents d'installation au système hôte.
///
/// Le flux d'installation est détaché du processus courant: la remise rend la
/// main dès que le lancement est demandé, sans jamais attendre l'interface
/// d'installation ni en suivre l'issue.
pub struct SystemIntentDispatcher {
    authority: FileShareAuthority,
}

impl SystemIntentDispatcher {
    /// Construit le dispatcher pour l'autorité configurée de ce processus.
    pub fn new(authority: FileShareAuthority) -> Self {
        Self { authority }
    }
}

impl IntentDispatcher for SystemIntentDispatcher {
    fn dispatch(&self, intent: &InstallIntent) -> Result<(), InstallError> {
        let dispatch_error = |reason: String| InstallError::Dispatch { reason };

        // Seule l'autorité qui a frappé la poignée sait la résoudre à nouveau
        // vers le stockage local.
        let package = intent.content.local_path(&self.authority).ok_or_else(|| {
            dispatch_error(format!(
                "content handle '{}' does not belong to authority '{}'",
                intent.content.uri(),
                self.authority.as_str()
            ))
        })?;

        let mut cmd = if cfg!(target_os = "windows") {
            // `start` ouvre l'installeur dans une tâche indépendante.
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(&package);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(&package);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(&package);
            cmd
        };
        configure_command_no_window(&mut cmd);

        cmd.spawn()
            .map(|_| ())
            .map_err(|e| dispatch_error(format!("unable to hand off to the system installer: {}", e)))
    }
}
