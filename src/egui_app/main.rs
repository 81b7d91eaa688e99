/**
 * Contact Book - Main Entry Point
 *
 * Resolves configuration, installs logging, builds the providers and hands
 * control to eframe. The session gate runs while the app state is built, so
 * the first frame already shows the right screen.
 */
use eframe::egui;
use contact_book::egui_app::{theme, views, AppState, Config};

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "contact_book=info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::load()?;
    tracing::info!("Provider: {:?}", config.provider());
    let state = AppState::from_config(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 760.0])
            .with_min_inner_size([360.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Contact Book",
        options,
        Box::new(move |cc| {
            theme::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(ContactBookApp { state }))
        }),
    )?;
    Ok(())
}

/// eframe wrapper around the application state
struct ContactBookApp {
    state: AppState,
}

impl eframe::App for ContactBookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);
        views::toast_view::render(ctx, &mut self.state.notifications);

        // Keep polling while work is in flight or toasts are counting down.
        if self.state.has_pending() || !self.state.notifications.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
