use crate::commands;

/// Enregistre la liste unique des commandes IPC exposées au frontend.
pub fn register_invoke_handler(builder: tauri::Builder<tauri::Wry>) -> tauri::Builder<tauri::Wry> {
    builder.invoke_handler(tauri::generate_handler![
        commands::installer::verify_installer_id,
        commands::installer::install_package,
        commands::application::get_application_info,
        commands::application::get_download_dir
    ])
}
