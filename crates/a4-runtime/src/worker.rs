use tokio::sync::mpsc;

use crate::{LayoutCommand, LayoutUpdate, handlers};

/// Async worker task that processes layout commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<LayoutCommand>,
    update_tx: mpsc::UnboundedSender<LayoutUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

/// Create the channels and spawn the worker on the current runtime
pub fn spawn_worker() -> (
    mpsc::UnboundedSender<LayoutCommand>,
    mpsc::UnboundedReceiver<LayoutUpdate>,
) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    tokio::spawn(worker_task(command_rx, update_tx));
    (command_tx, update_rx)
}

async fn process_command(cmd: LayoutCommand, update_tx: &mpsc::UnboundedSender<LayoutUpdate>) {
    match cmd {
        LayoutCommand::ReadImage { path, target } => {
            handlers::handle_read_image(path, target, update_tx).await;
        }
        LayoutCommand::DecodeImage { data_url, target } => {
            handlers::handle_decode_image(data_url, target, update_tx).await;
        }
        LayoutCommand::LoadPdf { path } => {
            handlers::handle_load_pdf(path, update_tx).await;
        }
        LayoutCommand::ExportDocument {
            blocks,
            options,
            output_path,
        } => {
            handlers::handle_export_document(blocks, options, output_path, update_tx).await;
        }
        LayoutCommand::ExportSigned {
            pdf_bytes,
            placements,
            output_path,
        } => {
            handlers::handle_export_signed(pdf_bytes, placements, output_path, update_tx).await;
        }
        LayoutCommand::MakeSignature {
            input_path,
            options,
        } => {
            handlers::handle_make_signature(input_path, options, update_tx).await;
        }
        LayoutCommand::LoadConfig { path } => {
            handlers::handle_load_config(path, update_tx).await;
        }
    }
}
