//! Entrypoint de la bibliothèque Tauri du shim natif Pocketvault.
//!
//! Cette unité reste volontairement mince: elle déclare les modules de domaine
//! puis délègue l'exécution à `app::run()`.

mod app;
mod commands;
pub mod installer;
pub mod platform;
mod utils;

/// Lance l'application Tauri.
pub fn run() {
    app::run();
}
