use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::task::JoinHandle;

use stockpanel::api::{InventoryApi, MemoryApi};
use stockpanel::config::Config;
use stockpanel::icons::IconService;
use stockpanel::logger::Logger;
use stockpanel::notifications::ModalPhase;
use stockpanel::products::ProductActions;
use stockpanel::{AppContext, Notifications};

/// Simulated API round-trip so the busy state is visible
const DEMO_LATENCY: Duration = Duration::from_millis(300);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    config.validate()?;
    let _logger = Logger::from_config(&config.logging)?;

    info!("Starting stockpanel with the {} backend", config.api.backend);

    let api: Arc<dyn InventoryApi> = match config.api.backend.as_str() {
        "memory" => Arc::new(MemoryApi::seeded().with_latency(DEMO_LATENCY)),
        other => anyhow::bail!("unsupported api.backend '{other}'"),
    };

    let notifications = Notifications::from_config(&config.notifications);
    let context = AppContext::new()
        .with_notifications(notifications.clone())
        .with_api(api)
        .with_icons(IconService::new(config.ui.icon_theme));

    let printer = spawn_printer(&context)?;
    let responder = spawn_responder(&context)?;

    let actions = ProductActions::from_context(&context)?;
    let products = actions.load_products().await?;

    match products.first() {
        Some(product) => {
            println!("Eliminando \"{}\" ({})", product.name, product.sku);
            let deleted = actions.delete_product(product).await?;
            info!("Product {} deleted: {}", product.id, deleted);

            let remaining = actions.load_products().await?;
            println!("Quedan {} productos", remaining.len());
        }
        None => println!("No hay productos"),
    }

    // Let the outcome toast run its course.
    let mut toasts = context.toasts()?.subscribe();
    toasts
        .wait_for(|visible| visible.is_empty())
        .await
        .context("Toast queue closed unexpectedly")?;

    responder.abort();
    printer.abort();
    notifications.clear_all();
    Ok(())
}

/// Print modal and toast changes as they happen.
fn spawn_printer(context: &AppContext) -> Result<JoinHandle<()>> {
    let mut modals = context.modals()?.subscribe();
    let mut toasts = context.toasts()?.subscribe();
    let icons = context.icons.clone();

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = modals.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let queued = modals.borrow_and_update().clone();
                    for modal in queued {
                        let cancel = if modal.show_cancel {
                            format!(" [{}]", modal.cancel_label)
                        } else {
                            String::new()
                        };
                        println!(
                            "{} {}: {} [{}]{} ({:?})",
                            icons.modal_icon(modal.kind),
                            modal.title,
                            modal.message,
                            modal.confirm_text(),
                            cancel,
                            modal.phase
                        );
                    }
                }
                changed = toasts.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let visible = toasts.borrow_and_update().clone();
                    if visible.is_empty() {
                        println!("(sin notificaciones)");
                    }
                    for toast in visible {
                        println!(
                            "{} {}: {} ({} ms)",
                            icons.toast_icon(toast.kind),
                            toast.title,
                            toast.message,
                            toast.remaining().as_millis()
                        );
                    }
                }
            }
        }
    }))
}

/// Stand-in for a user: confirms each modal once it becomes visible.
fn spawn_responder(context: &AppContext) -> Result<JoinHandle<()>> {
    let queue = context.modals()?.clone();
    let mut updates = queue.subscribe();

    Ok(tokio::spawn(async move {
        let mut answered = HashSet::new();
        while updates.changed().await.is_ok() {
            let focused = updates.borrow_and_update().first().cloned();
            let Some(modal) = focused else {
                continue;
            };
            if modal.phase != ModalPhase::Visible || !answered.insert(modal.id) {
                continue;
            }

            let queue = queue.clone();
            tokio::spawn(async move {
                if let Err(err) = queue.confirm(modal.id).await {
                    warn!("Confirm failed: {}", err);
                }
            });
        }
    }))
}
