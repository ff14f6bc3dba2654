//! Constants used throughout the application
//!
//! This module centralizes user-facing strings, default durations and other
//! constant values so the notification layer and the workflows stay consistent.

// Modal defaults
pub const DEFAULT_CONFIRM_LABEL: &str = "Confirmar";
pub const DEFAULT_CANCEL_LABEL: &str = "Cancelar";
pub const MODAL_BUSY_LABEL: &str = "Procesando...";
/// Delay before a queued modal is reported as visible (entry animation)
pub const DEFAULT_MODAL_ENTRY_DELAY_MS: u64 = 10;
/// Upper bound accepted for the modal entry delay
pub const MAX_MODAL_ENTRY_DELAY_MS: u64 = 2_000;

// Toast defaults
/// Time-to-live of a toast when the request does not specify one
pub const DEFAULT_TOAST_DURATION_MS: u64 = 5_000;
/// Upper bound accepted for the configured toast duration (10 minutes)
pub const MAX_TOAST_DURATION_MS: u64 = 600_000;

/// Capacity of the broadcast channels carrying queue events
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

// Product workflow texts
pub const MODAL_DELETE_PRODUCT_TITLE: &str = "Confirmar eliminación";
pub const MODAL_DELETE_PRODUCT_MESSAGE: &str =
    "¿Estás seguro de que quieres eliminar este producto? Esta acción no se puede deshacer.";
pub const MODAL_DELETE_CONFIRM_LABEL: &str = "Eliminar";

pub const SUCCESS_PRODUCT_DELETED: &str = "Producto eliminado";
pub const SUCCESS_PRODUCT_DELETED_MESSAGE: &str = "El producto ha sido eliminado exitosamente";
pub const SUCCESS_PRODUCT_CREATED: &str = "Producto agregado";
pub const SUCCESS_PRODUCT_CREATED_MESSAGE: &str = "El producto ha sido agregado exitosamente";
pub const SUCCESS_PRODUCT_UPDATED: &str = "Producto actualizado";
pub const SUCCESS_PRODUCT_UPDATED_MESSAGE: &str = "El producto ha sido actualizado exitosamente";

pub const ERROR_PRODUCT_DELETE_FAILED: &str = "Error al eliminar";
pub const ERROR_PRODUCT_SAVE_FAILED: &str = "Error al guardar";
pub const ERROR_PRODUCT_LOAD_FAILED: &str = "Error al cargar productos";
pub const ERROR_PRODUCT_LOAD_FALLBACK: &str = "No se pudieron cargar los productos.";
pub const ERROR_UNKNOWN_DELETE: &str = "Error desconocido al eliminar el producto";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const CONFIG_FILE_NAME: &str = "stockpanel.toml";
pub const APP_DIR_NAME: &str = "stockpanel";
