use tauri::Manager;

use crate::installer;

mod invoke;

/// Construit et lance l'application Tauri avec plugins, setup et commandes IPC.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Répare le PATH hérité des lanceurs graphiques avant tout spawn système.
    let _ = fix_path_env::fix();

    let builder = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_store::Builder::new().build())
        .plugin(tauri_plugin_fs::init())
        .plugin(tauri_plugin_opener::init());
    let builder = invoke::register_invoke_handler(builder);

    builder
        .setup(|app| {
            // Montage unique de l'attelage d'installation, figé sur la
            // génération de métadonnées détectée au démarrage.
            installer::init(&app.config().identifier);

            // Activation du logging Tauri en debug pour faciliter le diagnostic local.
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
